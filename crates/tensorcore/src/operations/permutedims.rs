//! Axis permutation.

use crate::element::Element;
use crate::error::TensorError;
use crate::tensor::Tensor;

/// Permute the axes of a tensor, returning a tensor with fresh storage.
///
/// # Arguments
///
/// * `tensor` - Input tensor
/// * `perm` - Permutation of axes. `perm[i]` gives the source axis
///   for the i-th axis of the result.
///
/// # Errors
///
/// Returns `TensorError::InvalidPermutation` if `perm` is not a valid
/// permutation of `0..ndim`.
///
/// # Examples
///
/// ```
/// use tensorcore::Tensor;
/// use tensorcore::operations::permutedims;
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let t2 = permutedims(&t, &[1, 0]).unwrap();
/// assert_eq!(t2.shape(), &[3, 2]);
/// assert_eq!(t.get(&[1, 0]), t2.get(&[0, 1]));
/// ```
pub fn permutedims<T: Element>(
    tensor: &Tensor<T>,
    perm: &[usize],
) -> Result<Tensor<T>, TensorError> {
    Ok(tensor.array().permute_axes(perm)?.into())
}

/// Permute with the default permutation of the rank.
///
/// A vector of length `n` becomes a `1 x n` row; a matrix is transposed.
///
/// # Errors
///
/// Returns `TensorError::MissingPermutation` for any other rank.
pub fn transpose<T: Element>(tensor: &Tensor<T>) -> Result<Tensor<T>, TensorError> {
    match tensor.ndim() {
        1 => tensor.reshape(&[1, tensor.len()]),
        2 => permutedims(tensor, &[1, 0]),
        ndim => Err(TensorError::MissingPermutation { ndim }),
    }
}
