//! Backing storage for tensors.
//!
//! ```text
//! SharedBuffer<T>  - reference-counted, interior-mutable element buffer
//! Dense<T>         - dense column-major array: shape + strides + SharedBuffer
//! ```
//!
//! `Dense` is the array primitive a [`Tensor`](crate::Tensor) wraps. Cloning a
//! `Dense` clones the handle, not the elements: both clones read and write the
//! same buffer.

mod buffer;
mod dense;

pub use buffer::SharedBuffer;
pub use dense::Dense;
