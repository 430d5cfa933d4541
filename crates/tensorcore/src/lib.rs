//! tensorcore - value-semantic tensors and multilinear algebra
//!
//! This crate provides a rank-N [`Tensor`] over a shared, column-major dense
//! array, together with the classical tensor-algebra operators: outer
//! product, single-axis contraction ("pushover"), inner product, axis
//! contraction, trace, and the Kronecker delta and Levi-Civita epsilon
//! tensors.
//!
//! # Architecture
//!
//! ```text
//! algebra      outer, pushover, inner, contract, trace, delta, epsilon
//!     ↓
//! operations   permutedims, reshape, getindex / setindex, convert
//!     ↓
//! Tensor       identity, equality, hashing, introspection
//!     ↓
//! storage      Dense<T> over SharedBuffer<T>
//!     ↓
//! backend      GenericBackend (naive loops), faer GEMM for f64 / c64
//! ```
//!
//! Axes and indices are zero-based.
//!
//! # Example
//!
//! ```
//! use tensorcore::{Tensor, idx};
//! use tensorcore::algebra::{delta, epsilon};
//!
//! // Create from data (column-major order)
//! let m = Tensor::from_vec((1..=9).collect::<Vec<i64>>(), &[9])
//!     .unwrap()
//!     .reshape(&[3, 3])
//!     .unwrap();
//! assert_eq!(m.get(&[0, 1]), Some(4));
//!
//! // Contracting with delta leaves a tensor unchanged
//! assert_eq!(m.dot(&delta(3)).unwrap(), m);
//!
//! // -(x . eps . y) is the cross product
//! let x = Tensor::from_vec(vec![1, 0, 0], &[3]).unwrap();
//! let y = Tensor::from_vec(vec![0, 1, 0], &[3]).unwrap();
//! let z = -x.dot(&epsilon(3)).unwrap().dot(&y).unwrap();
//! assert_eq!(z.to_vec(), vec![0, 0, 1]);
//!
//! // Indexing with scalars only gives a rank-0 tensor
//! let e = m.getindex(&idx![2, 2]).unwrap();
//! assert_eq!(e.to_scalar::<i64>().unwrap(), 9);
//! ```

pub mod algebra;
pub mod backend;
pub mod element;
pub mod error;
pub mod operations;
pub mod random;
pub mod storage;
pub mod strides;
pub mod tensor;

pub use element::{CastFrom, Element, Promote, SignedElement, c64};
pub use error::{ErrorKind, TensorError};
pub use operations::Selector;
pub use storage::Dense;
pub use tensor::Tensor;
