//! Backend traits.

use crate::element::Element;
use crate::storage::Dense;

/// Backend trait for permuting the axes of a dense array.
pub trait PermutationBackend {
    /// Permute `src` into `dest`.
    ///
    /// # Arguments
    ///
    /// * `dest` - Output array (must have permuted shape)
    /// * `src` - Input array
    /// * `perm` - Permutation of axes. `perm[i]` gives the source axis
    ///   for the i-th axis of the result.
    ///
    /// # Panics
    ///
    /// Panics if shapes don't match the permutation.
    fn permute_into<T: Element>(dest: &Dense<T>, src: &Dense<T>, perm: &[usize]);
}

/// Backend trait for column-major matrix products.
pub trait GemmBackend {
    /// Overwrite `c` (m x n) with `a` (m x k) times `b` (k x n).
    ///
    /// All three slices are column-major and tightly packed.
    fn gemm_into<T: Element>(c: &mut [T], a: &[T], b: &[T], m: usize, k: usize, n: usize);
}
