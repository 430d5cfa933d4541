//! Backend abstraction for tensor kernels.
//!
//! The algebra is written against two kernels:
//!
//! - [`PermutationBackend`]: copy a dense array into a buffer with reordered axes.
//! - [`GemmBackend`]: column-major matrix product, the core of `pushover`.
//!
//! # Backends
//!
//! - `GenericBackend`: Naive loop-based implementation (always available, every element type)
//! - faer: `f64` and `c64` GEMM goes through faer's `matmul`

mod faer_gemm;
mod generic;
mod permutation;

pub use faer_gemm::{faer_gemm_c64, faer_gemm_f64};
pub use generic::GenericBackend;
pub use permutation::{GemmBackend, PermutationBackend};
