//! Stride and index-space utilities.
//!
//! Uses column-major (Fortran) order: the first axis varies fastest.
//! Shapes are small, so they live in a [`SmallVec`] that stays on the stack
//! up to rank 4.

use smallvec::SmallVec;

/// Shape, strides or a multi-index.
pub type Shape = SmallVec<[usize; 4]>;

/// Compute column-major strides from shape.
///
/// For shape [d0, d1, d2, ...], returns strides [1, d0, d0*d1, ...].
///
/// # Examples
///
/// ```
/// use tensorcore::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]).as_slice(), &[1, 3, 12]);
/// assert_eq!(compute_strides(&[5]).as_slice(), &[1]);
/// assert!(compute_strides(&[]).is_empty());
/// ```
pub fn compute_strides(shape: &[usize]) -> Shape {
    let mut strides = Shape::with_capacity(shape.len());
    let mut stride = 1;
    for &dim in shape {
        strides.push(stride);
        stride *= dim;
    }
    strides
}

/// Number of elements of a shape. The empty shape (a scalar) has one.
#[inline]
pub fn shape_len(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Convert cartesian indices to a linear storage offset.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Convert a linear offset to cartesian indices (column-major).
///
/// `linear` must be smaller than `shape_len(shape)`.
pub fn linear_to_cartesian(mut linear: usize, shape: &[usize]) -> Shape {
    let mut indices = Shape::with_capacity(shape.len());
    for &dim in shape {
        indices.push(linear % dim);
        linear /= dim;
    }
    indices
}

/// Iterator over every multi-index of a shape in storage order.
///
/// The n-th item is `linear_to_cartesian(n, shape)`, but each step is an
/// increment with carry rather than a division per axis.
///
/// ```
/// use tensorcore::strides::CartesianIndices;
///
/// let all: Vec<Vec<usize>> = CartesianIndices::new(&[2, 2]).map(|i| i.to_vec()).collect();
/// assert_eq!(all, vec![vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct CartesianIndices {
    shape: Shape,
    current: Shape,
    remaining: usize,
}

impl CartesianIndices {
    /// Iterate over `shape`.
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: Shape::from_slice(shape),
            current: smallvec::smallvec![0; shape.len()],
            remaining: shape_len(shape),
        }
    }
}

impl Iterator for CartesianIndices {
    type Item = Shape;

    fn next(&mut self) -> Option<Shape> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.current.clone();
        self.remaining -= 1;
        if self.remaining > 0 {
            for (idx, &dim) in self.current.iter_mut().zip(self.shape.iter()) {
                *idx += 1;
                if *idx < dim {
                    break;
                }
                *idx = 0;
            }
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CartesianIndices {}
