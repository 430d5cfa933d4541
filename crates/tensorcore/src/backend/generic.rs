//! Generic (naive loop-based) backend implementation.

use crate::backend::{GemmBackend, PermutationBackend};
use crate::element::Element;
use crate::storage::Dense;
use crate::strides::CartesianIndices;

/// Generic backend using naive loop-based implementations.
///
/// Works for every [`Element`] type, including `bool` and the integers that
/// faer cannot multiply.
pub struct GenericBackend;

impl PermutationBackend for GenericBackend {
    fn permute_into<T: Element>(dest: &Dense<T>, src: &Dense<T>, perm: &[usize]) {
        let new_strides = dest.strides().to_vec();
        let src_data = src.data();
        let mut dest_data = dest.data_mut();

        // Walk the source in storage order; the cartesian iterator tracks the
        // multi-index so no division is needed per element.
        for (linear_old, old_indices) in CartesianIndices::new(src.shape()).enumerate() {
            // new_indices[i] = old_indices[perm[i]]
            let linear_new = perm
                .iter()
                .zip(new_strides.iter())
                .map(|(&p, &stride)| old_indices[p] * stride)
                .sum::<usize>();
            dest_data[linear_new] = src_data[linear_old];
        }
    }
}

impl GemmBackend for GenericBackend {
    fn gemm_into<T: Element>(c: &mut [T], a: &[T], b: &[T], m: usize, k: usize, n: usize) {
        for j in 0..n {
            for i in 0..m {
                let mut acc = T::zero();
                for p in 0..k {
                    acc = acc.add_elem(a[i + m * p].mul_elem(b[p + k * j]));
                }
                c[i + m * j] = acc;
            }
        }
    }
}
