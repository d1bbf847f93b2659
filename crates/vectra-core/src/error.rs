//! All errors returned by `vectra-core`.
//!
//! Every failure in the engine is immediate and synchronous: there is no
//! retry path and no partial result. Callers should treat these as
//! programming errors to fix, not transient conditions.

use crate::dtype::DType;
use thiserror::Error;

/// All errors returned by `vectra-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Shape and strides were given with different lengths.
    #[error("shape {shape:?} and strides of length {strides_len} must have the same length")]
    ShapeStridesMismatch {
        shape: Vec<usize>,
        strides_len: usize,
    },

    /// Operand shapes do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A shape specification is invalid.
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },

    /// Reshape target has a different total element count than the source.
    #[error("cannot reshape {from_elems} elements into shape {to:?} ({to_elems} elements)")]
    ReshapeMismatch {
        from_elems: usize,
        to: Vec<usize>,
        to_elems: usize,
    },

    /// Two shapes cannot be broadcast to a common shape.
    #[error("cannot broadcast shapes {shape_a:?} and {shape_b:?}")]
    NotBroadcastable {
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
    },

    /// An array cannot be broadcast to the requested target shape.
    #[error("cannot broadcast shape {shape:?} to {target:?}")]
    BroadcastToMismatch {
        shape: Vec<usize>,
        target: Vec<usize>,
    },

    /// An index selects a position outside its axis's extent.
    #[error("index {index} out of bounds for axis {axis} with size {size}")]
    IndexOutOfBounds {
        index: isize,
        axis: usize,
        size: usize,
    },

    /// An axis argument is out of bounds for the array's rank.
    #[error("axis {axis} out of bounds for array with {ndim} dimensions")]
    AxisOutOfBounds { axis: isize, ndim: usize },

    /// An index list consumes more source axes than the array has.
    #[error("too many indices: {given} axis selectors for array of rank {ndim}")]
    TooManyIndices { given: usize, ndim: usize },

    /// A descriptor would address bytes outside its buffer.
    #[error("descriptor spans bytes {min}..{max} outside buffer of {len} bytes")]
    OutOfBufferBounds { min: isize, max: isize, len: usize },

    /// The contiguous fast path was requested on a non-contiguous descriptor.
    #[error("array is not contiguous")]
    NotContiguous,

    /// A typed front-end was attached to a core with a different element tag.
    #[error("element type mismatch: core holds {core:?}, requested {requested:?}")]
    DTypeMismatch { core: DType, requested: DType },

    /// A dispatch-by-type entry point does not support this element kind.
    #[error("unsupported element type {dtype:?}")]
    UnsupportedDType { dtype: DType },

    /// A wrapped pointer is not aligned for its element type.
    #[error("pointer is not aligned to {alignment} bytes")]
    Misaligned { alignment: usize },

    /// Buffer allocation failed.
    #[error("failed to allocate {size} bytes")]
    AllocationFailed { size: usize },

    /// A slice was given a zero step.
    #[error("slice step must be non-zero")]
    ZeroStep,

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

/// Convenience alias used throughout `vectra-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
