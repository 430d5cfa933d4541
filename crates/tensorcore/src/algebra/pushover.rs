//! Single-axis contraction between two tensors.
//!
//! `pushover` moves the contracted axis of the left operand to the back and
//! the contracted axis of the right operand to the front, then multiplies the
//! two operands as column-major matrices:
//!
//! ```text
//! t1: [rest1..., k]  →  A (m x k),  m = |rest1|
//! t2: [k, rest2...]  →  B (k x n),  n = |rest2|
//! C = A * B          →  [rest1..., rest2...]
//! ```
//!
//! The multiplication goes through [`Element::gemm`], so `f64` and `c64`
//! operands use faer.

use std::iter;

use smallvec::SmallVec;
use tracing::debug;

use crate::element::{CastFrom, Element, Promote};
use crate::error::TensorError;
use crate::strides::shape_len;
use crate::tensor::Tensor;

use super::{check_axis, promoted_data};

/// Contract axis `d1` of `t1` against axis `d2` of `t2`.
///
/// The result holds the remaining axes of `t1` followed by the remaining axes
/// of `t2`, each in their original order, with the promoted element type.
///
/// # Errors
///
/// * `TensorError::AxisOutOfBounds` if `d1` or `d2` is not an axis of its
///   operand.
/// * `TensorError::AxisSizeMismatch` if the two axes have different sizes.
///
/// # Example
///
/// ```
/// use tensorcore::Tensor;
/// use tensorcore::algebra::pushover;
///
/// // C[i,k] = sum_j A[j,i] * B[j,k]
/// let a = Tensor::<f64>::ones(&[3, 2]);
/// let b = Tensor::<f64>::ones(&[3, 4]);
/// let c = pushover(&a, &b, 0, 0).unwrap();
/// assert_eq!(c.shape(), &[2, 4]);
/// assert!(c.data().iter().all(|&x| x == 3.0));
/// ```
pub fn pushover<A, B>(
    t1: &Tensor<A>,
    t2: &Tensor<B>,
    d1: usize,
    d2: usize,
) -> Result<Tensor<A::Output>, TensorError>
where
    A: Promote<B>,
    B: Element,
{
    check_axis(d1, t1.ndim())?;
    check_axis(d2, t2.ndim())?;
    let k = t1.shape()[d1];
    if k != t2.shape()[d2] {
        return Err(TensorError::AxisSizeMismatch {
            axis_a: d1,
            size_a: k,
            axis_b: d2,
            size_b: t2.shape()[d2],
        });
    }

    let perm1: SmallVec<[usize; 8]> = (0..t1.ndim())
        .filter(|&axis| axis != d1)
        .chain(iter::once(d1))
        .collect();
    let perm2: SmallVec<[usize; 8]> = iter::once(d2)
        .chain((0..t2.ndim()).filter(|&axis| axis != d2))
        .collect();

    let mut shape: SmallVec<[usize; 8]> = SmallVec::new();
    shape.extend(perm1[..perm1.len() - 1].iter().map(|&p| t1.shape()[p]));
    let m = shape_len(&shape);
    shape.extend(perm2[1..].iter().map(|&p| t2.shape()[p]));
    let n = shape_len(&shape[t1.ndim() - 1..]);

    let a = matricize::<A, A::Output>(t1, &perm1)?;
    let b = matricize::<B, A::Output>(t2, &perm2)?;
    debug!(m, k, n, "pushover contraction");

    let mut c = vec![<A::Output as Element>::zero(); m * n];
    <A::Output as Element>::gemm(&mut c, &a, &b, m, k, n);

    Ok(Tensor::from_vec_trusted(c, &shape))
}

/// Column-major elements of `tensor` permuted by `perm`, cast to `P`.
fn matricize<S, P>(tensor: &Tensor<S>, perm: &[usize]) -> Result<Vec<P>, TensorError>
where
    S: Element,
    P: Element + CastFrom<S>,
{
    let is_identity = perm.iter().enumerate().all(|(i, &p)| i == p);
    if is_identity {
        Ok(promoted_data(tensor))
    } else {
        Ok(promoted_data(&tensor.permutedims(perm)?))
    }
}

/// Inner product: contract the last axis of `conj(t1)` with the first axis of
/// `t2`.
///
/// # Errors
///
/// * `TensorError::RankTooLow` if either operand is rank 0.
/// * `TensorError::AxisSizeMismatch` if the contracted axes differ in size.
///
/// # Example
///
/// ```
/// use tensorcore::Tensor;
/// use tensorcore::algebra::inner;
///
/// let m = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
/// let v = Tensor::from_vec(vec![1, 1], &[2]).unwrap();
/// // row sums of [[1, 3], [2, 4]]
/// assert_eq!(inner(&m, &v).unwrap().to_vec(), vec![4, 6]);
/// ```
pub fn inner<A, B>(t1: &Tensor<A>, t2: &Tensor<B>) -> Result<Tensor<A::Output>, TensorError>
where
    A: Promote<B>,
    B: Element,
{
    for ndim in [t1.ndim(), t2.ndim()] {
        if ndim == 0 {
            return Err(TensorError::RankTooLow { min: 1, actual: 0 });
        }
    }
    pushover(&t1.conj(), t2, t1.ndim() - 1, 0)
}

impl<T: Element> Tensor<T> {
    /// Inner product with `other`; see [`inner`].
    pub fn dot<B: Element>(&self, other: &Tensor<B>) -> Result<Tensor<T::Output>, TensorError>
    where
        T: Promote<B>,
    {
        inner(self, other)
    }

    /// Contract axis `d1` of `self` with axis `d2` of `other`; see [`pushover`].
    pub fn pushover<B: Element>(
        &self,
        other: &Tensor<B>,
        d1: usize,
        d2: usize,
    ) -> Result<Tensor<T::Output>, TensorError>
    where
        T: Promote<B>,
    {
        pushover(self, other, d1, d2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::c64;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_matmul() {
        // A = [[1, 3], [2, 4]], B = [[5, 7], [6, 8]]
        let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let b = Tensor::from_vec(vec![5.0, 6.0, 7.0, 8.0], &[2, 2]).unwrap();
        let c = inner(&a, &b).unwrap();
        // A*B = [[23, 31], [34, 46]]
        assert_eq!(c.to_vec(), vec![23.0, 34.0, 31.0, 46.0]);
    }

    #[test]
    fn test_pushover_shape_law() {
        let t1: Tensor<f64> = Tensor::ones(&[2, 3, 4]);
        let t2: Tensor<f64> = Tensor::ones(&[5, 3]);
        let c = pushover(&t1, &t2, 1, 1).unwrap();
        assert_eq!(c.shape(), &[2, 4, 5]);
        assert!(c.data().iter().all(|&x| x == 3.0));
    }

    #[test]
    fn test_pushover_middle_axes() {
        // t1[i,j,k] = i + 10j + 100k over 2x3x2
        let mut t1: Tensor<i64> = Tensor::zeros(&[2, 3, 2]);
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..2 {
                    t1.set(&[i, j, k], (i + 10 * j + 100 * k) as i64).unwrap();
                }
            }
        }
        let t2 = Tensor::from_vec(vec![1, 0, 0, 0, 0, 1], &[2, 3]).unwrap();
        // c[i,k,a] = sum_j t1[i,j,k] * t2[a,j]
        let c = pushover(&t1, &t2, 1, 1).unwrap();
        assert_eq!(c.shape(), &[2, 2, 2]);
        for i in 0..2 {
            for k in 0..2 {
                for a in 0..2 {
                    let expected: i64 = (0..3)
                        .map(|j| t1.get(&[i, j, k]).unwrap() * t2.get(&[a, j]).unwrap())
                        .sum();
                    assert_eq!(c.get(&[i, k, a]), Some(expected));
                }
            }
        }
    }

    #[test]
    fn test_full_contraction() {
        let a = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let b = Tensor::from_vec(vec![4.0, 5.0, 6.0], &[3]).unwrap();
        let c = a.dot(&b).unwrap();
        assert_eq!(c.ndim(), 0);
        assert_relative_eq!(c.scalar_value().unwrap(), 32.0);
    }

    #[test]
    fn test_inner_conjugates_left() {
        let a = Tensor::from_vec(vec![c64::new(0.0, 1.0), c64::new(1.0, 0.0)], &[2]).unwrap();
        let c = inner(&a, &a).unwrap().scalar_value().unwrap();
        // <a, a> = |i|^2 + |1|^2
        assert_relative_eq!(c.re, 2.0);
        assert_relative_eq!(c.im, 0.0);
    }

    #[test]
    fn test_inner_mixed_types() {
        let a = Tensor::from_vec(vec![1i8, 2], &[2]).unwrap();
        let b = Tensor::from_vec(vec![0.5, 0.25], &[2]).unwrap();
        let c = inner(&a, &b).unwrap();
        assert_eq!(c.eltype(), "f64");
        assert_eq!(c.scalar_value().unwrap(), 1.0);
    }

    #[test]
    fn test_empty_contracted_axis() {
        let a: Tensor<f64> = Tensor::ones(&[2, 0]);
        let b: Tensor<f64> = Tensor::ones(&[0, 3]);
        let c = inner(&a, &b).unwrap();
        assert_eq!(c, Tensor::zeros(&[2, 3]));
    }

    #[test]
    fn test_pushover_errors() {
        let a: Tensor<f64> = Tensor::ones(&[2, 3]);
        let b: Tensor<f64> = Tensor::ones(&[3, 4]);

        let err = pushover(&a, &b, 2, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BoundsError);
        let err = pushover(&a, &b, 0, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BoundsError);

        let err = pushover(&a, &b, 0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_inner_rank_zero() {
        let s = Tensor::scalar(2.0);
        let v: Tensor<f64> = Tensor::ones(&[2]);
        assert_eq!(inner(&s, &v).unwrap_err().kind(), ErrorKind::ArgumentError);
        assert_eq!(inner(&v, &s).unwrap_err().kind(), ErrorKind::ArgumentError);
    }

    #[test]
    fn test_operands_untouched() {
        let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let before = a.copy();
        let _ = pushover(&a, &a, 0, 0).unwrap();
        assert_eq!(a, before);
        assert_eq!(a.shape(), &[2, 3]);
    }
}
