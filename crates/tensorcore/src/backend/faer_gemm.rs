//! GEMM through faer for the element types faer supports.
//!
//! Both faer and tensorcore store matrices column-major, so the packed
//! slices are viewed as faer matrices without copying.

use faer::linalg::matmul::matmul;
use faer::{Accum, MatMut, MatRef, Par};

use crate::element::c64;

macro_rules! faer_gemm {
    ($name:ident, $t:ty, $one:expr) => {
        /// Overwrite `c` (m x n) with `a` (m x k) times `b` (k x n) using faer.
        pub fn $name(c: &mut [$t], a: &[$t], b: &[$t], m: usize, k: usize, n: usize) {
            if m == 0 || n == 0 {
                return;
            }
            if k == 0 {
                c.fill(<$t>::default());
                return;
            }
            tracing::trace!(m, k, n, "faer gemm");

            let a_mat = MatRef::from_column_major_slice(a, m, k);
            let b_mat = MatRef::from_column_major_slice(b, k, n);
            let mut c_mat = MatMut::from_column_major_slice_mut(c, m, n);

            // C = alpha * A * B, overwriting C
            matmul(c_mat.as_mut(), Accum::Replace, a_mat, b_mat, $one, Par::Seq);
        }
    };
}

faer_gemm!(faer_gemm_f64, f64, 1.0);
faer_gemm!(faer_gemm_c64, c64, c64::new(1.0, 0.0));
