//! Multi-dimensional indexing and indexed assignment.
//!
//! A selection is one [`Selector`] per axis. An `At` selector picks a single
//! position and drops its axis from the result; `Range` and `All` keep the
//! axis. The [`idx!`](crate::idx) macro builds a selection from plain
//! indices and ranges:
//!
//! ```
//! use tensorcore::{Tensor, idx};
//!
//! let t = Tensor::from_vec((1..=12).collect::<Vec<i32>>(), &[3, 4]).unwrap();
//!
//! let col = t.getindex(&idx![.., 1]).unwrap();
//! assert_eq!(col.to_vec(), vec![4, 5, 6]);
//!
//! let block = t.getindex(&idx![0..2, 2..4]).unwrap();
//! assert_eq!(block.shape(), &[2, 2]);
//!
//! let elem = t.getindex(&idx![2, 3]).unwrap();
//! assert_eq!(elem.ndim(), 0);
//! assert_eq!(elem.scalar_value().unwrap(), 12);
//! ```

use std::ops::{Range, RangeFull, RangeInclusive};

use crate::element::Element;
use crate::error::TensorError;
use crate::strides::{CartesianIndices, Shape, cartesian_to_linear};
use crate::tensor::Tensor;

/// Selection along one axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// A single position; the axis is dropped from the result.
    At(usize),
    /// Half-open range of positions. A range with `start >= end` selects
    /// nothing and is never out of bounds.
    Range(Range<usize>),
    /// The whole axis.
    All,
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Selector::At(index)
    }
}

impl From<Range<usize>> for Selector {
    fn from(range: Range<usize>) -> Self {
        Selector::Range(range)
    }
}

impl From<RangeInclusive<usize>> for Selector {
    fn from(range: RangeInclusive<usize>) -> Self {
        let (start, end) = range.into_inner();
        match end.checked_add(1) {
            Some(end) => Selector::Range(start..end),
            // no axis reaches usize::MAX, so keep the range non-empty and let
            // resolution report it out of bounds
            None => Selector::Range(start.min(usize::MAX - 1)..usize::MAX),
        }
    }
}

impl From<RangeFull> for Selector {
    fn from(_: RangeFull) -> Self {
        Selector::All
    }
}

/// Build a `[Selector; N]` from indices and ranges.
///
/// ```
/// use tensorcore::{Selector, idx};
///
/// let sel = idx![0, .., 1..3];
/// assert_eq!(sel[0], Selector::At(0));
/// assert_eq!(sel[1], Selector::All);
/// assert_eq!(sel[2], Selector::Range(1..3));
/// ```
#[macro_export]
macro_rules! idx {
    ($($sel:expr),* $(,)?) => {
        [$($crate::Selector::from($sel)),*]
    };
}

/// Selection resolved against a shape.
struct Resolved {
    /// First selected position per axis.
    start: Shape,
    /// Number of selected positions per axis.
    extent: Shape,
    /// Extents of the axes kept in the result.
    kept: Shape,
}

fn resolve(shape: &[usize], selectors: &[Selector]) -> Result<Resolved, TensorError> {
    if selectors.len() != shape.len() {
        return Err(TensorError::WrongNumberOfIndices {
            shape: shape.to_vec(),
            actual: selectors.len(),
        });
    }

    let mut resolved = Resolved {
        start: Shape::with_capacity(shape.len()),
        extent: Shape::with_capacity(shape.len()),
        kept: Shape::new(),
    };
    for (axis, (sel, &dim)) in selectors.iter().zip(shape).enumerate() {
        match sel {
            Selector::At(index) => {
                if *index >= dim {
                    return Err(TensorError::IndexOutOfBounds {
                        shape: shape.to_vec(),
                        axis,
                        index: *index,
                    });
                }
                resolved.start.push(*index);
                resolved.extent.push(1);
            }
            Selector::Range(range) if range.is_empty() => {
                resolved.start.push(0);
                resolved.extent.push(0);
                resolved.kept.push(0);
            }
            Selector::Range(range) => {
                if range.end > dim {
                    return Err(TensorError::RangeOutOfBounds {
                        shape: shape.to_vec(),
                        axis,
                        start: range.start,
                        end: range.end,
                    });
                }
                resolved.start.push(range.start);
                resolved.extent.push(range.len());
                resolved.kept.push(range.len());
            }
            Selector::All => {
                resolved.start.push(0);
                resolved.extent.push(dim);
                resolved.kept.push(dim);
            }
        }
    }
    Ok(resolved)
}

impl Resolved {
    /// Storage offsets of the selected elements, in result order.
    fn offsets<'a>(&'a self, strides: &'a [usize]) -> impl Iterator<Item = usize> + 'a {
        CartesianIndices::new(&self.extent).map(move |local| {
            let absolute: Shape = local
                .iter()
                .zip(self.start.iter())
                .map(|(&i, &s)| i + s)
                .collect();
            cartesian_to_linear(&absolute, strides)
        })
    }
}

/// Check a selection against the shape of `tensor` without touching it.
///
/// # Errors
///
/// Returns a bounds error naming the offending axis and index, or
/// `TensorError::WrongNumberOfIndices` if there is not exactly one selector
/// per axis.
pub fn check_bounds<T: Element>(
    tensor: &Tensor<T>,
    selectors: &[Selector],
) -> Result<(), TensorError> {
    resolve(tensor.shape(), selectors).map(|_| ())
}

/// Boolean form of [`check_bounds`].
pub fn in_bounds<T: Element>(tensor: &Tensor<T>, selectors: &[Selector]) -> bool {
    check_bounds(tensor, selectors).is_ok()
}

/// Copy the selected elements into a new tensor.
///
/// The result has one axis per non-`At` selector; an all-`At` selection
/// gives a rank-0 tensor.
///
/// # Errors
///
/// Returns a bounds error if the selection does not fit the shape.
pub fn getindex<T: Element>(
    tensor: &Tensor<T>,
    selectors: &[Selector],
) -> Result<Tensor<T>, TensorError> {
    let resolved = resolve(tensor.shape(), selectors)?;
    let data = {
        let src = tensor.data();
        resolved
            .offsets(tensor.strides())
            .map(|offset| src[offset])
            .collect()
    };
    Tensor::from_vec(data, &resolved.kept)
}

/// Write `rhs` into the selected elements, through the shared storage.
///
/// `rhs` must have exactly the shape of the selection. It may alias `tensor`.
///
/// # Errors
///
/// Returns a bounds error if the selection does not fit the shape, or
/// `TensorError::ShapeMismatch` if `rhs` has a different shape than the
/// selection.
pub fn setindex<T: Element>(
    tensor: &Tensor<T>,
    selectors: &[Selector],
    rhs: &Tensor<T>,
) -> Result<(), TensorError> {
    let resolved = resolve(tensor.shape(), selectors)?;
    if rhs.shape() != resolved.kept.as_slice() {
        return Err(TensorError::ShapeMismatch {
            expected: resolved.kept.to_vec(),
            actual: rhs.shape().to_vec(),
        });
    }
    // read first: rhs may share storage with tensor
    let values = rhs.to_vec();
    let mut dest = tensor.array().data_mut();
    for (offset, value) in resolved.offsets(tensor.strides()).zip(values) {
        dest[offset] = value;
    }
    Ok(())
}

/// Write `value` into every selected element, through the shared storage.
///
/// # Errors
///
/// Returns a bounds error if the selection does not fit the shape.
pub fn fill_index<T: Element>(
    tensor: &Tensor<T>,
    selectors: &[Selector],
    value: T,
) -> Result<(), TensorError> {
    let resolved = resolve(tensor.shape(), selectors)?;
    let mut dest = tensor.array().data_mut();
    for offset in resolved.offsets(tensor.strides()) {
        dest[offset] = value;
    }
    Ok(())
}

impl<T: Element> Tensor<T> {
    /// Copy out a selection; see [`getindex`].
    pub fn getindex(&self, selectors: &[Selector]) -> Result<Self, TensorError> {
        getindex(self, selectors)
    }

    /// Assign a tensor to a selection; see [`setindex`].
    pub fn setindex(&mut self, selectors: &[Selector], rhs: &Self) -> Result<(), TensorError> {
        setindex(self, selectors, rhs)
    }

    /// Assign a scalar to every element of a selection; see [`fill_index`].
    pub fn fill_index(&mut self, selectors: &[Selector], value: T) -> Result<(), TensorError> {
        fill_index(self, selectors, value)
    }

    /// Check a selection without reading; see [`check_bounds`].
    pub fn check_bounds(&self, selectors: &[Selector]) -> Result<(), TensorError> {
        check_bounds(self, selectors)
    }

    /// Whether a selection fits the shape; see [`in_bounds`].
    pub fn in_bounds(&self, selectors: &[Selector]) -> bool {
        in_bounds(self, selectors)
    }
}
