//! Element type conversion.

use crate::element::{CastFrom, Element, convert_exact};
use crate::error::TensorError;
use crate::tensor::Tensor;

/// Convert every element of `tensor` to `S`, all or nothing.
///
/// # Errors
///
/// Returns `TensorError::InexactConversion` for the first element (in storage
/// order) that does not survive the conversion unchanged.
pub fn convert<T, S>(tensor: &Tensor<T>) -> Result<Tensor<S>, TensorError>
where
    T: Element + CastFrom<S>,
    S: Element + CastFrom<T>,
{
    let data = tensor
        .data()
        .iter()
        .map(|&x| convert_exact(x))
        .collect::<Result<Vec<S>, _>>()?;
    Tensor::from_vec(data, tensor.shape())
}

/// The element of a rank-0 tensor.
///
/// # Errors
///
/// Returns `TensorError::NotAScalar` if `tensor` has any axes, including a
/// single-element tensor of shape `[1]`.
pub fn scalar_value<T: Element>(tensor: &Tensor<T>) -> Result<T, TensorError> {
    if tensor.ndim() != 0 {
        return Err(TensorError::NotAScalar {
            shape: tensor.shape().to_vec(),
        });
    }
    tensor
        .get_linear(0)
        .ok_or_else(|| TensorError::NotAScalar { shape: Vec::new() })
}

/// The element of a rank-0 tensor, converted exactly to `S`.
///
/// # Errors
///
/// Returns `TensorError::NotAScalar` for tensors with axes and
/// `TensorError::InexactConversion` if the value does not fit `S`.
pub fn to_scalar<T, S>(tensor: &Tensor<T>) -> Result<S, TensorError>
where
    T: Element + CastFrom<S>,
    S: Element + CastFrom<T>,
{
    convert_exact(scalar_value(tensor)?)
}
