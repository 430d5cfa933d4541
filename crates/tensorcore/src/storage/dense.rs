//! Dense column-major array.

use std::cell::{Ref, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::backend::{GenericBackend, PermutationBackend};
use crate::element::Element;
use crate::error::TensorError;
use crate::storage::SharedBuffer;
use crate::strides::{CartesianIndices, Shape, cartesian_to_linear, compute_strides, shape_len};

/// Dense array of `T` in column-major order.
///
/// `Clone` produces another handle to the same elements; use
/// [`Dense::deep_copy`] for an independent array.
#[derive(Debug, Clone)]
pub struct Dense<T: Element> {
    buffer: SharedBuffer<T>,
    shape: Shape,
    strides: Shape,
}

impl<T: Element> Dense<T> {
    /// Allocate an array of the given shape, filled with `value`.
    pub fn filled(shape: &[usize], value: T) -> Self {
        Self {
            buffer: SharedBuffer::filled(shape_len(shape), value),
            shape: Shape::from_slice(shape),
            strides: compute_strides(shape),
        }
    }

    /// Allocate a zero-initialized array.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::filled(shape, T::zero())
    }

    /// Create an array from column-major data.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::LengthMismatch` if `data.len()` differs from the
    /// number of elements of `shape`.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self, TensorError> {
        let expected = shape_len(shape);
        if data.len() != expected {
            return Err(TensorError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            buffer: SharedBuffer::from_vec(data),
            shape: Shape::from_slice(shape),
            strides: compute_strides(shape),
        })
    }

    /// Wrap data already known to hold exactly `shape_len(shape)` elements.
    pub(crate) fn from_vec_trusted(data: Vec<T>, shape: &[usize]) -> Self {
        debug_assert_eq!(data.len(), shape_len(shape));
        Self {
            buffer: SharedBuffer::from_vec(data),
            shape: Shape::from_slice(shape),
            strides: compute_strides(shape),
        }
    }

    /// Get the shape.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Get strides.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Get the number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Get total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        shape_len(&self.shape)
    }

    /// Check if the array has zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the elements in storage order.
    ///
    /// # Panics
    ///
    /// Panics if a write through a handle sharing this buffer is in progress.
    #[inline]
    pub fn data(&self) -> Ref<'_, [T]> {
        self.buffer.borrow()
    }

    /// Borrow the elements mutably. Writes are seen by every handle.
    #[inline]
    pub fn data_mut(&self) -> RefMut<'_, [T]> {
        self.buffer.borrow_mut()
    }

    /// Copy the elements out in storage order.
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer.to_vec()
    }

    /// Get element by linear index.
    #[inline]
    pub fn get_linear(&self, i: usize) -> Option<T> {
        self.data().get(i).copied()
    }

    /// Read the element at a multi-index.
    ///
    /// Returns `None` if indices are out of bounds or wrong number of indices.
    pub fn read(&self, indices: &[usize]) -> Option<T> {
        if indices.len() != self.ndim() {
            return None;
        }
        if indices.iter().zip(self.shape.iter()).any(|(&i, &d)| i >= d) {
            return None;
        }
        self.get_linear(cartesian_to_linear(indices, &self.strides))
    }

    /// Write the element at a multi-index.
    ///
    /// # Errors
    ///
    /// Returns a bounds error if indices are out of range or their number
    /// differs from the rank.
    pub fn write(&self, indices: &[usize], value: T) -> Result<(), TensorError> {
        if indices.len() != self.ndim() {
            return Err(TensorError::WrongNumberOfIndices {
                shape: self.shape.to_vec(),
                actual: indices.len(),
            });
        }
        for (axis, (&index, &dim)) in indices.iter().zip(self.shape.iter()).enumerate() {
            if index >= dim {
                return Err(TensorError::IndexOutOfBounds {
                    shape: self.shape.to_vec(),
                    axis,
                    index,
                });
            }
        }
        let linear = cartesian_to_linear(indices, &self.strides);
        self.data_mut()[linear] = value;
        Ok(())
    }

    /// Check if both arrays are handles to the same elements.
    #[inline]
    pub fn same_storage(&self, other: &Self) -> bool {
        self.buffer.ptr_eq(&other.buffer)
    }

    /// Copy into a freshly allocated array of the same shape.
    pub fn deep_copy(&self) -> Self {
        Self {
            buffer: SharedBuffer::from_vec(self.to_vec()),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }

    /// Reinterpret the element sequence under a new shape, in a fresh array.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::LengthMismatch` if the element counts differ.
    pub fn reshaped(&self, new_shape: &[usize]) -> Result<Self, TensorError> {
        Self::from_vec(self.to_vec(), new_shape).map_err(|_| TensorError::LengthMismatch {
            expected: self.len(),
            actual: shape_len(new_shape),
        })
    }

    /// Copy into a fresh array whose axes are reordered by `perm`.
    ///
    /// `perm[i]` gives the source axis for the i-th axis of the result.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidPermutation` if `perm` is not a
    /// permutation of `0..ndim`.
    pub fn permute_axes(&self, perm: &[usize]) -> Result<Self, TensorError> {
        validate_permutation(perm, self.ndim())?;
        let new_shape: Shape = perm.iter().map(|&p| self.shape[p]).collect();
        let result = Self::zeros(&new_shape);
        GenericBackend::permute_into(&result, self, perm);
        Ok(result)
    }

    /// Elementwise approximate equality.
    ///
    /// Elements `a`, `b` match when `|a - b| <= epsilon` or
    /// `|a - b| <= max_relative * max(|a|, |b|)`. Equal elements always match,
    /// including infinities. Shapes must be equal.
    pub fn approx_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        if self.shape != other.shape {
            return false;
        }
        if self.same_storage(other) {
            return true;
        }
        let lhs = self.data();
        let rhs = other.data();
        lhs.iter().zip(rhs.iter()).all(|(&a, &b)| {
            // equal infinities have a NaN distance, unequal ones an infinite one
            if a == b {
                return true;
            }
            let diff = a.distance(b);
            diff.is_finite()
                && (diff <= epsilon || diff <= max_relative * a.magnitude().max(b.magnitude()))
        })
    }
}

/// Validate that perm is a valid permutation of 0..ndim.
pub(crate) fn validate_permutation(perm: &[usize], ndim: usize) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidPermutation {
        perm: perm.to_vec(),
        ndim,
    };
    if perm.len() != ndim {
        return Err(invalid());
    }
    let mut seen = vec![false; ndim];
    for &p in perm {
        if p >= ndim || seen[p] {
            return Err(invalid());
        }
        seen[p] = true;
    }
    Ok(())
}

impl<T: Element> PartialEq for Dense<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.shape != other.shape {
            return false;
        }
        self.same_storage(other) || *self.data() == *other.data()
    }
}

impl<T: Element> Hash for Dense<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.hash(state);
        for x in self.data().iter() {
            x.hash_elem(state);
        }
    }
}

impl<T: Element> fmt::Display for Dense<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        match self.ndim() {
            0 => write!(f, "{:?}", data[0]),
            1 => {
                write!(f, "[")?;
                for (i, x) in data.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x:?}")?;
                }
                write!(f, "]")
            }
            _ => {
                let (rows, cols) = (self.shape[0], self.shape[1]);
                let page = rows * cols;
                for (p, outer) in CartesianIndices::new(&self.shape[2..]).enumerate() {
                    if self.ndim() > 2 {
                        if p > 0 {
                            writeln!(f)?;
                        }
                        write!(f, "[:, :")?;
                        for i in outer.iter() {
                            write!(f, ", {i}")?;
                        }
                        writeln!(f, "] =")?;
                    }
                    for i in 0..rows {
                        for j in 0..cols {
                            if j > 0 {
                                write!(f, "  ")?;
                            }
                            write!(f, "{:?}", data[p * page + i + j * rows])?;
                        }
                        if i + 1 < rows {
                            writeln!(f)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
