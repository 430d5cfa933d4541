//! Tensor operations.
//!
//! Each operation allocates its output and never writes to its operands,
//! except for the indexed assignments in [`index`]:
//!
//! ```text
//! permutedims(tensor, perm)
//!     → validate permutation
//!     → allocate output with permuted shape
//!     → dispatch to backend (GenericBackend)
//! ```

mod convert;
mod elementwise;
pub mod index;
mod permutedims;
mod reshape;

pub use convert::{convert, scalar_value, to_scalar};
pub use elementwise::{conj, map, scale};
pub use index::{Selector, check_bounds, fill_index, getindex, in_bounds, setindex};
pub use permutedims::{permutedims, transpose};
pub use reshape::reshape;
