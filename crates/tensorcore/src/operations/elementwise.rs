//! Elementwise maps.

use std::ops::Neg;

use crate::element::{Element, SignedElement};
use crate::tensor::Tensor;

/// Apply `f` to every element, collecting into a new tensor of the same shape.
pub fn map<T, U, F>(tensor: &Tensor<T>, f: F) -> Tensor<U>
where
    T: Element,
    U: Element,
    F: FnMut(T) -> U,
{
    let data: Vec<U> = tensor.data().iter().copied().map(f).collect();
    Tensor::from_vec_trusted(data, tensor.shape())
}

/// Elementwise complex conjugate. A copy for real element types.
pub fn conj<T: Element>(tensor: &Tensor<T>) -> Tensor<T> {
    map(tensor, T::conj)
}

/// Multiply every element by `alpha`.
pub fn scale<T: Element>(tensor: &Tensor<T>, alpha: T) -> Tensor<T> {
    map(tensor, |x| x.mul_elem(alpha))
}

impl<T: Element> Tensor<T> {
    /// Elementwise complex conjugate; see [`conj`].
    pub fn conj(&self) -> Self {
        conj(self)
    }

    /// Apply `f` to every element; see [`map`].
    pub fn map<U: Element, F: FnMut(T) -> U>(&self, f: F) -> Tensor<U> {
        map(self, f)
    }
}

impl<T: SignedElement> Neg for &Tensor<T> {
    type Output = Tensor<T>;

    fn neg(self) -> Tensor<T> {
        map(self, T::negate)
    }
}

impl<T: SignedElement> Neg for Tensor<T> {
    type Output = Tensor<T>;

    fn neg(self) -> Tensor<T> {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::c64;

    #[test]
    fn test_conj() {
        let t = Tensor::from_vec(vec![c64::new(1.0, 2.0), c64::new(0.0, -1.0)], &[2]).unwrap();
        let c = t.conj();
        assert_eq!(c.to_vec(), vec![c64::new(1.0, -2.0), c64::new(0.0, 1.0)]);
        assert!(!c.same_storage(&t));

        let r = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        assert_eq!(r.conj(), r);
    }

    #[test]
    fn test_scale_and_neg() {
        let t = Tensor::from_vec(vec![1, -2, 3], &[3]).unwrap();
        assert_eq!(scale(&t, 2).to_vec(), vec![2, -4, 6]);
        assert_eq!((-&t).to_vec(), vec![-1, 2, -3]);
        assert_eq!(-(-t.clone()), t);
    }

    #[test]
    fn test_map_changes_type() {
        let t = Tensor::from_vec(vec![1.0, -2.0, 3.0, 0.0], &[2, 2]).unwrap();
        let positive = t.map(|x| x > 0.0);
        assert_eq!(positive.shape(), &[2, 2]);
        assert_eq!(positive.to_vec(), vec![true, false, true, false]);
    }
}
