//! Invariant tensors: Kronecker delta and Levi-Civita epsilon.

use tracing::debug;

use crate::element::{Promote, SignedElement};
use crate::error::TensorError;
use crate::strides::{compute_strides, shape_len};
use crate::tensor::Tensor;

use super::pushover;

/// Kronecker delta: the `n x n` boolean identity.
///
/// Contracting any axis of size `n` with `delta(n)` leaves a tensor unchanged.
///
/// ```
/// use tensorcore::algebra::delta;
///
/// let d = delta(3);
/// assert_eq!(d.shape(), &[3, 3]);
/// assert_eq!(d.get(&[1, 1]), Some(true));
/// assert_eq!(d.get(&[0, 1]), Some(false));
/// ```
pub fn delta(n: usize) -> Tensor<bool> {
    let mut data = vec![false; n * n];
    for i in 0..n {
        data[i * (n + 1)] = true;
    }
    Tensor::from_vec_trusted(data, &[n, n])
}

/// [`delta`] with the size given as a const generic.
pub fn delta_n<const N: usize>() -> Tensor<bool> {
    delta(N)
}

/// Levi-Civita tensor of rank `n`, every axis of size `n`.
///
/// The entry at a multi-index is zero when two indices coincide, otherwise the
/// sign of the permutation the indices form. `epsilon(0)` is the rank-0
/// tensor holding `1`. The tensor has `n^n` entries.
///
/// ```
/// use tensorcore::algebra::epsilon;
///
/// let e = epsilon(3);
/// assert_eq!(e.get(&[0, 1, 2]), Some(1));
/// assert_eq!(e.get(&[1, 0, 2]), Some(-1));
/// assert_eq!(e.get(&[0, 0, 2]), Some(0));
/// ```
pub fn epsilon(n: usize) -> Tensor<i8> {
    let shape = vec![n; n];
    let strides = compute_strides(&shape);
    let len = shape_len(&shape);
    debug!(rank = n, entries = len, "building epsilon tensor");

    let mut data = vec![0i8; len];
    let offset = |perm: &[usize]| -> usize {
        perm.iter().zip(&strides).map(|(&p, &s)| p * s).sum()
    };

    // Heap's algorithm: each step is one transposition, so the sign flips
    let mut perm: Vec<usize> = (0..n).collect();
    let mut counters = vec![0usize; n];
    let mut sign = 1i8;
    data[offset(&perm)] = sign;
    let mut i = 1;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                perm.swap(0, i);
            } else {
                perm.swap(counters[i], i);
            }
            sign = -sign;
            data[offset(&perm)] = sign;
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }

    Tensor::from_vec_trusted(data, &shape)
}

/// Cross product `a x b = -(a . epsilon(3) . b)`.
///
/// Contracts the last axis of `a` and the first axis of `b`, so a higher-rank
/// `a` gives a batch of cross products. Neither operand is conjugated.
///
/// # Errors
///
/// Returns `TensorError::AxisSizeMismatch` unless the last axis of `a` and
/// the first axis of `b` have size 3, and `TensorError::RankTooLow` for
/// rank-0 operands.
///
/// ```
/// use tensorcore::Tensor;
/// use tensorcore::algebra::cross;
///
/// let x = Tensor::from_vec(vec![1, 0, 0], &[3]).unwrap();
/// let y = Tensor::from_vec(vec![0, 1, 0], &[3]).unwrap();
/// assert_eq!(cross(&x, &y).unwrap().to_vec(), vec![0, 0, 1]);
/// ```
pub fn cross<T>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, TensorError>
where
    T: SignedElement + Promote<i8, Output = T> + Promote<T, Output = T>,
{
    for ndim in [a.ndim(), b.ndim()] {
        if ndim == 0 {
            return Err(TensorError::RankTooLow { min: 1, actual: 0 });
        }
    }
    let left = pushover::<T, i8>(a, &epsilon(3), a.ndim() - 1, 0)?;
    Ok(-pushover::<T, T>(&left, b, left.ndim() - 1, 0)?)
}
