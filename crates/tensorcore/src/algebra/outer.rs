//! Outer product.

use smallvec::SmallVec;

use crate::element::{Element, Promote};
use crate::tensor::Tensor;

use super::promoted_data;

/// Compute the outer product of two tensors.
///
/// For A with shape [a0, a1, ...] and B with shape [b0, b1, ...],
/// returns C with shape [a0, a1, ..., b0, b1, ...] where
/// C[i0, i1, ..., j0, j1, ...] = A[i0, i1, ...] * B[j0, j1, ...]
///
/// # Example
///
/// ```
/// use tensorcore::Tensor;
/// use tensorcore::algebra::outer;
///
/// let a = Tensor::from_vec(vec![1, 2], &[2]).unwrap();
/// let b = Tensor::from_vec(vec![3.0, 4.0, 5.0], &[3]).unwrap();
/// let c = outer(&a, &b);
///
/// assert_eq!(c.shape(), &[2, 3]);
/// assert_eq!(c.eltype(), "f64");
/// assert_eq!(c.get(&[1, 0]), Some(6.0));
/// assert_eq!(c.get(&[0, 1]), Some(4.0));
/// ```
pub fn outer<A, B>(a: &Tensor<A>, b: &Tensor<B>) -> Tensor<A::Output>
where
    A: Promote<B>,
    B: Element,
{
    let mut shape: SmallVec<[usize; 8]> = SmallVec::from_slice(a.shape());
    shape.extend_from_slice(b.shape());

    let a_data: Vec<A::Output> = promoted_data(a);
    let b_data: Vec<A::Output> = promoted_data(b);

    // In column-major order: linear index = i + j * a_len
    let mut data = Vec::with_capacity(a_data.len() * b_data.len());
    for &b_j in &b_data {
        data.extend(a_data.iter().map(|&a_i| a_i.mul_elem(b_j)));
    }

    Tensor::from_vec_trusted(data, &shape)
}

/// Outer product of a sequence of tensors, reduced left to right.
///
/// The empty sequence gives the rank-0 tensor holding one.
///
/// ```
/// use tensorcore::Tensor;
/// use tensorcore::algebra::outer_all;
///
/// let v = Tensor::from_vec(vec![1, 2], &[2]).unwrap();
/// assert_eq!(outer_all(&[&v, &v, &v]).shape(), &[2, 2, 2]);
/// assert_eq!(outer_all::<i32>(&[]), Tensor::scalar(1));
/// ```
pub fn outer_all<T>(tensors: &[&Tensor<T>]) -> Tensor<T>
where
    T: Promote<T, Output = T>,
{
    tensors
        .iter()
        .fold(Tensor::scalar(T::one()), |acc, &t| outer(&acc, t))
}

impl<T: Element> Tensor<T> {
    /// Outer product with `other`; see [`outer`].
    pub fn outer<B: Element>(&self, other: &Tensor<B>) -> Tensor<T::Output>
    where
        T: Promote<B>,
    {
        outer(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::c64;

    #[test]
    fn test_outer_1d_1d() {
        let a = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let b = Tensor::from_vec(vec![3.0, 4.0, 5.0], &[3]).unwrap();
        let c = outer(&a, &b);

        assert_eq!(c.shape(), &[2, 3]);

        // c[i, j] = a[i] * b[j]
        assert_eq!(c.get(&[0, 0]), Some(3.0)); // 1*3
        assert_eq!(c.get(&[1, 0]), Some(6.0)); // 2*3
        assert_eq!(c.get(&[0, 1]), Some(4.0)); // 1*4
        assert_eq!(c.get(&[1, 1]), Some(8.0)); // 2*4
        assert_eq!(c.get(&[0, 2]), Some(5.0)); // 1*5
        assert_eq!(c.get(&[1, 2]), Some(10.0)); // 2*5
    }

    #[test]
    fn test_outer_2d_1d() {
        let a = Tensor::from_vec(vec![1, 2, 3, 4], &[2, 2]).unwrap();
        let b = Tensor::from_vec(vec![10, 20], &[2]).unwrap();
        let c = outer(&a, &b);

        assert_eq!(c.shape(), &[2, 2, 2]);

        // a is column-major: a[0,0]=1, a[1,0]=2, a[0,1]=3, a[1,1]=4
        assert_eq!(c.get(&[0, 0, 0]), Some(10));
        assert_eq!(c.get(&[1, 0, 0]), Some(20));
        assert_eq!(c.get(&[0, 1, 0]), Some(30));
        assert_eq!(c.get(&[1, 1, 0]), Some(40));
        assert_eq!(c.get(&[0, 0, 1]), Some(20));
        assert_eq!(c.get(&[1, 0, 1]), Some(40));
    }

    #[test]
    fn test_outer_scalar() {
        let a = Tensor::scalar(2.0);
        let b = Tensor::from_vec(vec![3.0, 4.0, 5.0], &[3]).unwrap();
        let c = outer(&a, &b);
        assert_eq!(c.shape(), &[3]);
        assert_eq!(c.to_vec(), vec![6.0, 8.0, 10.0]);

        let s = outer(&a, &Tensor::scalar(3.0));
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.scalar_value().unwrap(), 6.0);
    }

    #[test]
    fn test_outer_promotes() {
        let a = Tensor::from_vec(vec![true, false], &[2]).unwrap();
        let b = Tensor::from_vec(vec![c64::new(0.0, 1.0)], &[1]).unwrap();
        let c = a.outer(&b);
        assert_eq!(c.eltype(), "c64");
        assert_eq!(c.to_vec(), vec![c64::new(0.0, 1.0), c64::new(0.0, 0.0)]);
    }

    #[test]
    fn test_outer_complex() {
        let a = Tensor::from_vec(vec![c64::new(1.0, 1.0), c64::new(2.0, 0.0)], &[2]).unwrap();
        let b = Tensor::from_vec(vec![c64::new(1.0, 0.0), c64::new(0.0, 1.0)], &[2]).unwrap();
        let c = outer(&a, &b);

        // c[0,1] = (1+i) * i = -1+i
        assert_eq!(c.get(&[0, 1]), Some(c64::new(-1.0, 1.0)));
        assert_eq!(c.get(&[1, 1]), Some(c64::new(0.0, 2.0)));
    }

    #[test]
    fn test_outer_all() {
        let a = Tensor::from_vec(vec![1, 2], &[2]).unwrap();
        let b = Tensor::from_vec(vec![3, 4, 5], &[3]).unwrap();
        assert_eq!(outer_all(&[&a]), a);
        assert_eq!(outer_all(&[&a, &b]), outer(&a, &b));
        assert_eq!(outer_all(&[&a, &b, &a]), outer(&outer(&a, &b), &a));
        assert_eq!(outer_all::<f64>(&[]), Tensor::scalar(1.0));
    }

    #[test]
    fn test_outer_fresh_storage() {
        let a = Tensor::from_vec(vec![1, 2], &[2]).unwrap();
        let one = Tensor::scalar(1);
        let c = outer(&a, &one);
        assert_eq!(c, a);
        assert!(!c.same_storage(&a));
    }
}
