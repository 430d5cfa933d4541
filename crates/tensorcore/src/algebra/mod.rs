//! Multilinear algebra on [`Tensor`](crate::Tensor)s.
//!
//! Every operator reads its operands, allocates a fresh result and leaves the
//! operands untouched. Mixed element types combine into their
//! [`Promote`](crate::element::Promote)d type.
//!
//! ```text
//! outer(a, b)             shape(a) ++ shape(b)
//! pushover(a, b, d1, d2)  shape(a) \ d1 ++ shape(b) \ d2
//! inner(a, b)             pushover(conj(a), b, last, 0)
//! contract(t, d1, d2)     shape(t) \ {d1, d2}
//! trace(m)                contract(m, 0, 1)
//! ```

mod contract;
mod invariant;
mod outer;
mod pushover;

pub use contract::{contract, trace};
pub use invariant::{cross, delta, delta_n, epsilon};
pub use outer::{outer, outer_all};
pub use pushover::{inner, pushover};

use crate::element::{CastFrom, Element};
use crate::error::TensorError;
use crate::tensor::Tensor;

/// Elements of `tensor` cast into the promoted type `P`, in storage order.
fn promoted_data<S: Element, P: Element + CastFrom<S>>(tensor: &Tensor<S>) -> Vec<P> {
    tensor.data().iter().map(|&x| P::cast_from(x)).collect()
}

fn check_axis(axis: usize, ndim: usize) -> Result<(), TensorError> {
    if axis >= ndim {
        return Err(TensorError::AxisOutOfBounds { axis, ndim });
    }
    Ok(())
}
