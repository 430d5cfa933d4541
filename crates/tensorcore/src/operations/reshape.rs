//! Reshape.

use crate::element::Element;
use crate::error::TensorError;
use crate::tensor::Tensor;

/// Reinterpret the column-major element sequence of `tensor` under
/// `new_shape`, in fresh storage.
///
/// # Errors
///
/// Returns `TensorError::LengthMismatch` if `new_shape` holds a different
/// number of elements.
pub fn reshape<T: Element>(
    tensor: &Tensor<T>,
    new_shape: &[usize],
) -> Result<Tensor<T>, TensorError> {
    Ok(tensor.array().reshaped(new_shape)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_reshape_column_major() {
        let t = Tensor::from_vec((1..=9).collect::<Vec<i64>>(), &[9]).unwrap();
        let m = reshape(&t, &[3, 3]).unwrap();
        let expected = Tensor::from_vec(vec![1, 2, 3, 4, 5, 6, 7, 8, 9], &[3, 3]).unwrap();
        assert_eq!(m, expected);
        assert_eq!(m.get(&[0, 2]), Some(7));
        assert_eq!(m.get(&[2, 0]), Some(3));
    }

    #[test]
    fn test_reshape_does_not_alias() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4]).unwrap();
        let mut m = reshape(&t, &[2, 2]).unwrap();
        m.set(&[0, 0], 10.0).unwrap();
        assert_eq!(t.get(&[0]), Some(1.0));
        assert_eq!(t.shape(), &[4]);
    }

    #[test]
    fn test_reshape_to_scalar() {
        let t = Tensor::from_vec(vec![5], &[1, 1]).unwrap();
        let s = reshape(&t, &[]).unwrap();
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.scalar_value().unwrap(), 5);
    }

    #[test]
    fn test_reshape_length_mismatch() {
        let t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        let err = reshape(&t, &[4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert_eq!(
            err,
            TensorError::LengthMismatch {
                expected: 6,
                actual: 4
            }
        );
    }
}
