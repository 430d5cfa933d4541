//! Value-semantic tensor over a shared dense array.
//!
//! A [`Tensor`] is a thin wrapper around a [`Dense`] array:
//!
//! ```text
//! Tensor<T>
//! └── Dense<T>             shape, strides
//!     └── SharedBuffer<T>  Rc<RefCell<Vec<T>>>
//! ```
//!
//! Two tensors are *identical* when they share the buffer, and *equal* when
//! their shapes and elements agree. Cloning a tensor (or wrapping an existing
//! array with [`Tensor::from_array`]) aliases the buffer, so an indexed
//! assignment through one handle is visible through the others. Every
//! operation that returns a new tensor allocates fresh storage.

use std::cell::Ref;
use std::fmt;
use std::hash::{Hash, Hasher};

use approx::{AbsDiffEq, RelativeEq};

use crate::element::{CastFrom, Element};
use crate::error::TensorError;
use crate::operations;
use crate::storage::Dense;

/// Tag hashed ahead of the backing array so that a tensor and the array it
/// wraps never produce the same hash.
pub const TENSOR_HASH_TAG: u64 = 0x9e6f_1c27_53ab_d40b;

/// A rank-N tensor of `T` with column-major storage.
///
/// `Clone` returns another handle to the same storage; use [`Tensor::copy`]
/// for an independent tensor.
#[derive(Debug, Clone)]
pub struct Tensor<T: Element> {
    array: Dense<T>,
}

impl<T: Element> Tensor<T> {
    /// Wrap an existing array. The tensor shares the array's storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorcore::{Dense, Tensor};
    ///
    /// let a = Dense::from_vec(vec![1, 2, 3], &[3]).unwrap();
    /// let t = Tensor::from_array(&a);
    /// a.write(&[0], 10).unwrap();
    /// assert_eq!(t.get(&[0]), Some(10));
    /// ```
    pub fn from_array(array: &Dense<T>) -> Self {
        Self {
            array: array.clone(),
        }
    }

    /// Create tensor from data and shape.
    ///
    /// Data is expected to be in column-major order.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::LengthMismatch` if data length doesn't match shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorcore::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.shape(), &[2, 3]);
    /// assert_eq!(t.get(&[1, 0]), Some(2.0)); // Column-major: [1,0] is second element
    /// assert_eq!(t.get(&[0, 1]), Some(3.0));
    /// ```
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self, TensorError> {
        Ok(Self {
            array: Dense::from_vec(data, shape)?,
        })
    }

    /// Build from data whose length is known to match `shape`.
    pub(crate) fn from_vec_trusted(data: Vec<T>, shape: &[usize]) -> Self {
        Self {
            array: Dense::from_vec_trusted(data, shape),
        }
    }

    /// Create a new tensor with the given shape, zero-initialized.
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            array: Dense::zeros(shape),
        }
    }

    /// Create a tensor filled with ones.
    pub fn ones(shape: &[usize]) -> Self {
        Self::filled(shape, T::one())
    }

    /// Create a tensor filled with `value`.
    pub fn filled(shape: &[usize], value: T) -> Self {
        Self {
            array: Dense::filled(shape, value),
        }
    }

    /// Create a rank-0 tensor holding `value`.
    pub fn scalar(value: T) -> Self {
        Self::filled(&[], value)
    }

    /// Get the shape of the tensor.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.array.shape()
    }

    /// Size along `axis`; axes past the rank have size 1.
    ///
    /// ```
    /// use tensorcore::Tensor;
    ///
    /// let t = Tensor::<f64>::zeros(&[2, 3]);
    /// assert_eq!(t.size(1), 3);
    /// assert_eq!(t.size(5), 1);
    /// ```
    #[inline]
    pub fn size(&self, axis: usize) -> usize {
        self.shape().get(axis).copied().unwrap_or(1)
    }

    /// Get the rank (number of axes).
    #[inline]
    pub fn ndim(&self) -> usize {
        self.array.ndim()
    }

    /// Get total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Check if tensor is empty (has zero elements).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Name of the element type.
    #[inline]
    pub fn eltype(&self) -> &'static str {
        T::NAME
    }

    /// Get strides.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.array.strides()
    }

    /// Borrow the elements in storage order.
    ///
    /// # Panics
    ///
    /// Writing through any tensor that shares this storage (`set`,
    /// `setindex`, `fill_index`) panics while the returned `Ref` is alive.
    /// Use [`Tensor::to_vec`] for a snapshot that does not hold the borrow.
    #[inline]
    pub fn data(&self) -> Ref<'_, [T]> {
        self.array.data()
    }

    /// Copy the elements out in storage order.
    pub fn to_vec(&self) -> Vec<T> {
        self.array.to_vec()
    }

    /// The backing array handle.
    #[inline]
    pub fn array(&self) -> &Dense<T> {
        &self.array
    }

    /// Unwrap into the backing array handle.
    pub fn into_array(self) -> Dense<T> {
        self.array
    }

    /// Get element by linear index.
    #[inline]
    pub fn get_linear(&self, i: usize) -> Option<T> {
        self.array.get_linear(i)
    }

    /// Get element by cartesian indices.
    ///
    /// Returns `None` if indices are out of bounds or wrong number of indices.
    #[inline]
    pub fn get(&self, indices: &[usize]) -> Option<T> {
        self.array.read(indices)
    }

    /// Set element by cartesian indices, writing through to shared storage.
    ///
    /// # Errors
    ///
    /// Returns a bounds error if indices are out of range or their number
    /// differs from the rank.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<(), TensorError> {
        self.array.write(indices, value)
    }

    /// Check if both tensors share storage (identity).
    #[inline]
    pub fn same_storage(&self, other: &Self) -> bool {
        self.array.same_storage(&other.array)
    }

    /// Copy into a tensor with its own storage.
    pub fn copy(&self) -> Self {
        Self {
            array: self.array.deep_copy(),
        }
    }

    /// Approximate equality with the default tolerances.
    ///
    /// ```
    /// use tensorcore::Tensor;
    ///
    /// let a = Tensor::from_vec(vec![0.1 + 0.2], &[1]).unwrap();
    /// let b = Tensor::from_vec(vec![0.3], &[1]).unwrap();
    /// assert!(a != b);
    /// assert!(a.isapprox(&b));
    /// ```
    pub fn isapprox(&self, other: &Self) -> bool {
        self.relative_eq(
            other,
            Self::default_epsilon(),
            Self::default_max_relative(),
        )
    }

    /// Convert elementwise to `S`, requiring every element to convert exactly.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InexactConversion` naming the first element that
    /// `S` cannot represent.
    ///
    /// ```
    /// use tensorcore::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
    /// let i = t.convert::<i64>().unwrap();
    /// assert_eq!(i.to_vec(), vec![1, 2]);
    ///
    /// let t = Tensor::from_vec(vec![1.5], &[1]).unwrap();
    /// assert!(t.convert::<i64>().is_err());
    /// ```
    pub fn convert<S>(&self) -> Result<Tensor<S>, TensorError>
    where
        S: Element + CastFrom<T>,
        T: CastFrom<S>,
    {
        operations::convert(self)
    }

    /// Constructor form of [`Tensor::convert`]: build a `Tensor<T>` from a
    /// tensor of another element type.
    pub fn try_from_tensor<S>(source: &Tensor<S>) -> Result<Self, TensorError>
    where
        S: Element + CastFrom<T>,
        T: CastFrom<S>,
    {
        operations::convert(source)
    }

    /// The single element of a rank-0 tensor.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::NotAScalar` if the tensor has axes.
    pub fn scalar_value(&self) -> Result<T, TensorError> {
        operations::scalar_value(self)
    }

    /// The single element of a rank-0 tensor, converted exactly to `S`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::NotAScalar` if the tensor has axes and
    /// `TensorError::InexactConversion` if `S` cannot represent the value.
    pub fn to_scalar<S>(&self) -> Result<S, TensorError>
    where
        S: Element + CastFrom<T>,
        T: CastFrom<S>,
    {
        operations::to_scalar(self)
    }

    /// Reshape into a new tensor with fresh storage.
    ///
    /// The element sequence (column-major) is kept and reinterpreted under
    /// `new_shape`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::LengthMismatch` if the total number of elements
    /// differs.
    ///
    /// # Example
    ///
    /// ```
    /// use tensorcore::Tensor;
    ///
    /// let t = Tensor::from_vec((1..=9).collect::<Vec<i32>>(), &[9]).unwrap();
    /// let m = t.reshape(&[3, 3]).unwrap();
    /// assert_eq!(m.get(&[0, 1]), Some(4));
    /// assert_eq!(t.shape(), &[9]);
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self, TensorError> {
        operations::reshape(self, new_shape)
    }

    /// Permute the axes into a new tensor.
    ///
    /// # Arguments
    ///
    /// * `perm` - Permutation of axes. `perm[i]` gives the source axis
    ///   for the i-th axis of the result.
    ///
    /// # Errors
    ///
    /// Returns error if `perm` is not a valid permutation of `0..ndim`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorcore::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let t2 = t.permutedims(&[1, 0]).unwrap();
    /// assert_eq!(t2.shape(), &[3, 2]);
    /// assert_eq!(t.get(&[0, 2]), t2.get(&[2, 0]));
    /// ```
    pub fn permutedims(&self, perm: &[usize]) -> Result<Self, TensorError> {
        operations::permutedims(self, perm)
    }

    /// Permute with the default permutation: a vector becomes a `1 x n` row,
    /// a matrix is transposed.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::MissingPermutation` for ranks other than 1 and 2.
    pub fn transpose(&self) -> Result<Self, TensorError> {
        operations::transpose(self)
    }
}

impl<T: Element> From<Dense<T>> for Tensor<T> {
    fn from(array: Dense<T>) -> Self {
        Self { array }
    }
}

impl<T: Element> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.array == other.array
    }
}

impl<T: Element + Eq> Eq for Tensor<T> {}

impl<T: Element> Hash for Tensor<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(TENSOR_HASH_TAG);
        self.array.hash(state);
    }
}

impl<T: Element> AbsDiffEq for Tensor<T> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.array.approx_eq(&other.array, epsilon, 0.0)
    }
}

impl<T: Element> RelativeEq for Tensor<T> {
    fn default_max_relative() -> f64 {
        f64::EPSILON.sqrt()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.array.approx_eq(&other.array, epsilon, max_relative)
    }
}

impl<T: Element> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tensor<{}> of shape {:?}:", T::NAME, self.shape())?;
        write!(f, "{}", self.array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::c64;
    use crate::error::ErrorKind;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn test_zeros_generic<T: Element>() {
        let t: Tensor<T> = Tensor::zeros(&[2, 3]);
        assert_eq!(t.shape(), &[2, 3]);
        assert_eq!(t.ndim(), 2);
        assert_eq!(t.len(), 6);
        assert_eq!(t.strides(), &[1, 2]);
        for i in 0..6 {
            assert_eq!(t.get_linear(i).unwrap(), T::zero());
        }
    }

    #[test]
    fn test_zeros_f64() {
        test_zeros_generic::<f64>();
    }

    #[test]
    fn test_zeros_c64() {
        test_zeros_generic::<c64>();
    }

    #[test]
    fn test_zeros_bool() {
        test_zeros_generic::<bool>();
    }

    #[test]
    fn test_scalar_tensor() {
        let t = Tensor::scalar(2.5);
        assert_eq!(t.ndim(), 0);
        assert_eq!(t.len(), 1);
        assert_eq!(t.shape(), &[] as &[usize]);
        assert_eq!(t.get(&[]), Some(2.5));
    }

    #[test]
    fn test_size_past_rank() {
        let t = Tensor::<i32>::zeros(&[2, 3]);
        assert_eq!(t.size(0), 2);
        assert_eq!(t.size(1), 3);
        assert_eq!(t.size(2), 1);
        assert_eq!(Tensor::scalar(1i32).size(0), 1);
    }

    #[test]
    fn test_eltype() {
        assert_eq!(Tensor::<f64>::zeros(&[1]).eltype(), "f64");
        assert_eq!(Tensor::<bool>::zeros(&[1]).eltype(), "bool");
        assert_eq!(Tensor::<i8>::zeros(&[1]).eltype(), "i8");
    }

    #[test]
    fn test_from_array_aliases() {
        let a = Dense::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        let t = Tensor::from_array(&a);
        let u = Tensor::from_array(&a);
        assert!(t.same_storage(&u));
        assert_eq!(t, u);

        let mut v = t.clone();
        v.set(&[1, 1], 40).unwrap();
        assert_eq!(u.get(&[1, 1]), Some(40));
        assert_eq!(a.read(&[1, 1]), Some(40));
    }

    #[test]
    fn test_copy_is_independent() {
        let t = Tensor::from_vec(vec![1, 2, 3], &[3]).unwrap();
        let mut c = t.copy();
        assert!(!t.same_storage(&c));
        assert_eq!(t, c);

        c.set(&[0], 100).unwrap();
        assert_eq!(t.get(&[0]), Some(1));
        assert_ne!(t, c);
    }

    #[test]
    fn test_equality_shape_matters() {
        let a = Tensor::from_vec(vec![1, 2, 3, 4], &[4]).unwrap();
        let b = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_shared_storage_equal_with_nan() {
        let t = Tensor::from_vec(vec![f64::NAN], &[1]).unwrap();
        let alias = t.clone();
        assert_eq!(t, alias);
        assert_ne!(t, t.copy());
    }

    #[test]
    #[should_panic(expected = "already borrowed")]
    fn test_write_while_data_borrowed_panics() {
        let mut t = Tensor::from_vec(vec![1, 2], &[2]).unwrap();
        let alias = t.clone();
        let _view = alias.data();
        let _ = t.set(&[0], 5);
    }

    #[test]
    fn test_hash_equal_tensors() {
        let a = Tensor::from_vec(vec![1, 2, 3], &[3]).unwrap();
        let b = Tensor::from_vec(vec![1, 2, 3], &[3]).unwrap();
        assert_eq!(hash_of(&a), hash_of(&b));

        let z = Tensor::from_vec(vec![0.0], &[1]).unwrap();
        let nz = Tensor::from_vec(vec![-0.0], &[1]).unwrap();
        assert_eq!(z, nz);
        assert_eq!(hash_of(&z), hash_of(&nz));
    }

    #[test]
    fn test_hash_differs_from_array() {
        let t = Tensor::from_vec(vec![1, 2, 3], &[3]).unwrap();
        assert_ne!(hash_of(&t), hash_of(t.array()));
    }

    #[test]
    fn test_approx() {
        let a = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let b = Tensor::from_vec(vec![1.0 + 1e-10, 2.0], &[2]).unwrap();
        assert_ne!(a, b);
        assert!(a.isapprox(&b));
        approx::assert_relative_eq!(a, b);
        approx::assert_abs_diff_eq!(a, b, epsilon = 1e-9);

        let c = Tensor::from_vec(vec![1.1, 2.0], &[2]).unwrap();
        assert!(!a.isapprox(&c));
    }

    #[test]
    fn test_scalar_value() {
        assert_eq!(Tensor::scalar(3i64).scalar_value().unwrap(), 3);
        let err = Tensor::<i64>::zeros(&[1]).scalar_value().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }

    #[test]
    fn test_display() {
        let t = Tensor::from_vec(vec![1, 2], &[2]).unwrap();
        assert_eq!(t.to_string(), "Tensor<i32> of shape [2]:\n[1, 2]");
    }
}
