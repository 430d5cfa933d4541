//! Contraction of two axes of one tensor.

use smallvec::SmallVec;

use crate::element::Element;
use crate::error::TensorError;
use crate::strides::shape_len;
use crate::tensor::Tensor;

use super::check_axis;

/// Sum the diagonal of `tensor` taken along axes `d1` and `d2`.
///
/// The result keeps the other axes in their original order, so its rank is
/// two less than the rank of `tensor`.
///
/// # Errors
///
/// * `TensorError::RepeatedAxis` if `d1 == d2`.
/// * `TensorError::AxisOutOfBounds` if either axis is out of range.
/// * `TensorError::AxisSizeMismatch` if the two axes differ in size.
///
/// # Example
///
/// ```
/// use tensorcore::Tensor;
/// use tensorcore::algebra::contract;
///
/// // t[i,j,k] = 1 everywhere; summing the diagonal of axes 0 and 2 gives 2
/// let t = Tensor::<i32>::ones(&[2, 3, 2]);
/// let c = contract(&t, 0, 2).unwrap();
/// assert_eq!(c.shape(), &[3]);
/// assert_eq!(c.to_vec(), vec![2, 2, 2]);
/// ```
pub fn contract<T: Element>(
    tensor: &Tensor<T>,
    d1: usize,
    d2: usize,
) -> Result<Tensor<T>, TensorError> {
    if d1 == d2 {
        return Err(TensorError::RepeatedAxis { axis: d1 });
    }
    let ndim = tensor.ndim();
    check_axis(d1, ndim)?;
    check_axis(d2, ndim)?;
    let n = tensor.shape()[d1];
    if n != tensor.shape()[d2] {
        return Err(TensorError::AxisSizeMismatch {
            axis_a: d1,
            size_a: n,
            axis_b: d2,
            size_b: tensor.shape()[d2],
        });
    }

    // [d1, d2, rest...]: each trailing index owns a contiguous n x n block
    let perm: SmallVec<[usize; 8]> = [d1, d2]
        .into_iter()
        .chain((0..ndim).filter(|&axis| axis != d1 && axis != d2))
        .collect();
    let shape: SmallVec<[usize; 8]> = perm[2..].iter().map(|&p| tensor.shape()[p]).collect();
    let permuted = tensor.permutedims(&perm)?;
    tracing::trace!(diagonal = n, blocks = shape_len(&shape), "contract");

    let block = n * n;
    let src = permuted.data();
    let data: Vec<T> = (0..shape_len(&shape))
        .map(|r| {
            (0..n).fold(T::zero(), |acc, i| {
                acc.add_elem(src[r * block + i * (n + 1)])
            })
        })
        .collect();

    Ok(Tensor::from_vec_trusted(data, &shape))
}

/// Trace of a square matrix, as a rank-0 tensor.
///
/// # Errors
///
/// * `TensorError::RankMismatch` if `matrix` is not rank 2.
/// * `TensorError::AxisSizeMismatch` if it is not square.
///
/// ```
/// use tensorcore::Tensor;
/// use tensorcore::algebra::trace;
///
/// let m = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// assert_eq!(trace(&m).unwrap().scalar_value().unwrap(), 5.0);
/// ```
pub fn trace<T: Element>(matrix: &Tensor<T>) -> Result<Tensor<T>, TensorError> {
    if matrix.ndim() != 2 {
        return Err(TensorError::RankMismatch {
            expected: 2,
            actual: matrix.ndim(),
        });
    }
    contract(matrix, 0, 1)
}

impl<T: Element> Tensor<T> {
    /// Contract axes `d1` and `d2`; see [`contract`].
    pub fn contract(&self, d1: usize, d2: usize) -> Result<Self, TensorError> {
        contract(self, d1, d2)
    }

    /// Trace of a square matrix; see [`trace`].
    pub fn trace(&self) -> Result<Self, TensorError> {
        trace(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::c64;
    use crate::error::ErrorKind;

    fn iota_3d() -> Tensor<i64> {
        // t[i,j,k] = i + 10j + 100k over 3x2x3
        let mut t = Tensor::zeros(&[3, 2, 3]);
        for i in 0..3 {
            for j in 0..2 {
                for k in 0..3 {
                    t.set(&[i, j, k], (i + 10 * j + 100 * k) as i64).unwrap();
                }
            }
        }
        t
    }

    #[test]
    fn test_contract_outer_axes() {
        let t = iota_3d();
        let c = contract(&t, 0, 2).unwrap();
        assert_eq!(c.shape(), &[2]);
        for j in 0..2 {
            let expected: i64 = (0..3).map(|i| t.get(&[i, j, i]).unwrap()).sum();
            assert_eq!(c.get(&[j]), Some(expected));
        }
        // axis order does not matter
        assert_eq!(contract(&t, 2, 0).unwrap(), c);
    }

    #[test]
    fn test_contract_rank2_is_scalar() {
        let m = Tensor::from_vec(vec![1, 2, 3, 4, 5, 6, 7, 8, 9], &[3, 3]).unwrap();
        let c = contract(&m, 0, 1).unwrap();
        assert_eq!(c.ndim(), 0);
        assert_eq!(c.scalar_value().unwrap(), 15);
    }

    #[test]
    fn test_contract_keeps_rest_order() {
        let t: Tensor<f64> = Tensor::ones(&[2, 4, 2, 5]);
        let c = contract(&t, 0, 2).unwrap();
        assert_eq!(c.shape(), &[4, 5]);
        assert!(c.data().iter().all(|&x| x == 2.0));
    }

    #[test]
    fn test_contract_errors() {
        let t: Tensor<f64> = Tensor::ones(&[2, 3, 2]);
        assert_eq!(
            contract(&t, 1, 1).unwrap_err(),
            TensorError::RepeatedAxis { axis: 1 }
        );
        assert_eq!(contract(&t, 0, 3).unwrap_err().kind(), ErrorKind::BoundsError);
        assert_eq!(
            contract(&t, 0, 1).unwrap_err().kind(),
            ErrorKind::DimensionMismatch
        );
        // distinctness is checked before bounds
        assert_eq!(
            contract(&t, 7, 7).unwrap_err().kind(),
            ErrorKind::ArgumentError
        );
    }

    #[test]
    fn test_trace() {
        let m = Tensor::from_vec(
            vec![
                c64::new(1.0, 1.0),
                c64::new(5.0, 0.0),
                c64::new(7.0, 0.0),
                c64::new(2.0, -3.0),
            ],
            &[2, 2],
        )
        .unwrap();
        let t = m.trace().unwrap();
        assert_eq!(t.ndim(), 0);
        assert_eq!(t.scalar_value().unwrap(), c64::new(3.0, -2.0));
    }

    #[test]
    fn test_trace_errors() {
        let v: Tensor<f64> = Tensor::ones(&[3]);
        assert_eq!(trace(&v).unwrap_err().kind(), ErrorKind::ArgumentError);
        let m: Tensor<f64> = Tensor::ones(&[2, 3]);
        assert_eq!(trace(&m).unwrap_err().kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_trace_empty() {
        let m: Tensor<f64> = Tensor::ones(&[0, 0]);
        assert_eq!(trace(&m).unwrap().scalar_value().unwrap(), 0.0);
    }
}
