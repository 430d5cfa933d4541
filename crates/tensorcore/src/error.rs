//! Error types for tensorcore.

use thiserror::Error;

/// Coarse classification of [`TensorError`] variants.
///
/// Every error raised by the crate belongs to exactly one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An index or axis is outside the valid range for a shape.
    BoundsError,
    /// Two sizes that must agree do not.
    DimensionMismatch,
    /// A structural precondition independent of sizes is violated.
    ArgumentError,
    /// An element conversion would change its value.
    InexactConversion,
    /// The operand lacks the capability the operation needs.
    TypeError,
}

/// Errors that can occur in tensor operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TensorError {
    /// Scalar index out of range along one axis.
    #[error("attempt to access tensor of shape {shape:?} at index {index} along axis {axis}")]
    IndexOutOfBounds {
        shape: Vec<usize>,
        axis: usize,
        index: usize,
    },

    /// Range selector out of range along one axis.
    #[error(
        "attempt to access tensor of shape {shape:?} at range {start}..{end} along axis {axis}"
    )]
    RangeOutOfBounds {
        shape: Vec<usize>,
        axis: usize,
        start: usize,
        end: usize,
    },

    /// Number of selectors differs from the rank.
    #[error("wrong number of indices for tensor of shape {shape:?}: got {actual}")]
    WrongNumberOfIndices { shape: Vec<usize>, actual: usize },

    /// Axis number not smaller than the rank.
    #[error("axis {axis} out of range for tensor of rank {ndim}")]
    AxisOutOfBounds { axis: usize, ndim: usize },

    /// Element count does not match the requested shape.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Two shapes that must be equal differ.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Two axes paired by a contraction have different sizes.
    #[error("axis {axis_a} has size {size_a} but axis {axis_b} has size {size_b}")]
    AxisSizeMismatch {
        axis_a: usize,
        size_a: usize,
        axis_b: usize,
        size_b: usize,
    },

    /// Invalid permutation.
    #[error("invalid permutation {perm:?} for tensor with {ndim} dimensions")]
    InvalidPermutation { perm: Vec<usize>, ndim: usize },

    /// The same axis was given twice where distinct axes are required.
    #[error("axes must be distinct, got {axis} twice")]
    RepeatedAxis { axis: usize },

    /// Operation requires a tensor of at least the given rank.
    #[error("expected tensor of rank at least {min}, got rank {actual}")]
    RankTooLow { min: usize, actual: usize },

    /// Operation requires specific tensor rank.
    #[error("expected tensor of rank {expected}, got rank {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// Default permutation only exists for ranks 1 and 2.
    #[error("a permutation must be given for tensors of rank {ndim}")]
    MissingPermutation { ndim: usize },

    /// Value cannot be represented exactly in the target element type.
    #[error("{value} cannot be converted exactly to {target}")]
    InexactConversion { value: String, target: &'static str },

    /// A sampling range contains no values.
    #[error("cannot sample from the empty range {range}")]
    EmptySampleRange { range: String },

    /// Tried to read a bare scalar out of a tensor with axes.
    #[error("tensor of shape {shape:?} is not a scalar")]
    NotAScalar { shape: Vec<usize> },
}

impl TensorError {
    /// The taxonomy kind this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TensorError::IndexOutOfBounds { .. }
            | TensorError::RangeOutOfBounds { .. }
            | TensorError::WrongNumberOfIndices { .. }
            | TensorError::AxisOutOfBounds { .. } => ErrorKind::BoundsError,
            TensorError::LengthMismatch { .. }
            | TensorError::ShapeMismatch { .. }
            | TensorError::AxisSizeMismatch { .. } => ErrorKind::DimensionMismatch,
            TensorError::InvalidPermutation { .. }
            | TensorError::RepeatedAxis { .. }
            | TensorError::RankTooLow { .. }
            | TensorError::RankMismatch { .. }
            | TensorError::MissingPermutation { .. }
            | TensorError::EmptySampleRange { .. } => ErrorKind::ArgumentError,
            TensorError::InexactConversion { .. } => ErrorKind::InexactConversion,
            TensorError::NotAScalar { .. } => ErrorKind::TypeError,
        }
    }
}
