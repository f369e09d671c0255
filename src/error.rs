//! Error types.
//!
//! Tensor-level failures live in [`TensorError`]; everything the network
//! layer can add on top of that is in [`Error`]. Neither is ever retried
//! internally: a failing batch aborts the whole training call.

use thiserror::Error;

/// Failures raised by tensor construction, indexing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// An index tuple falls outside the declared extents.
    #[error("index {index:?} is out of range for shape {shape:?}")]
    IndexOutOfRange {
        /// The offending index tuple.
        index: Vec<usize>,
        /// Shape of the tensor that was accessed.
        shape: Vec<usize>,
    },

    /// The product of the extents does not fit in `usize`.
    #[error("shape {shape:?} overflows the addressable element count")]
    ShapeOverflow {
        /// The requested shape.
        shape: Vec<usize>,
    },

    /// A flat buffer does not hold exactly `product(shape)` elements.
    #[error("shape {shape:?} needs {expected} elements, got {got}")]
    DataLength {
        /// Target shape.
        shape: Vec<usize>,
        /// Element count implied by the shape.
        expected: usize,
        /// Element count supplied.
        got: usize,
    },

    /// A reshape would need more elements than the tensor currently owns.
    #[error("cannot reshape to {shape:?}: needs {required} elements, only {available} stored")]
    ReshapeTooLarge {
        /// Requested shape.
        shape: Vec<usize>,
        /// Elements required by the requested shape.
        required: usize,
        /// Elements currently stored.
        available: usize,
    },

    /// Two shapes cannot be reconciled by broadcasting.
    #[error("shapes {left:?} and {right:?} are not broadcast compatible")]
    BroadcastMismatch {
        /// Left operand shape.
        left: Vec<usize>,
        /// Right operand shape.
        right: Vec<usize>,
    },

    /// An operation that requires identical shapes received different ones.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Left operand shape.
        left: Vec<usize>,
        /// Right operand shape.
        right: Vec<usize>,
    },

    /// Matrix dimensions disagree, or an operation got an unsupported rank.
    #[error("{op}: incompatible dimensions {left:?} and {right:?}")]
    DimensionMismatch {
        /// Name of the failing operation.
        op: &'static str,
        /// Shape of the first operand.
        left: Vec<usize>,
        /// Shape of the second operand (empty for unary operations).
        right: Vec<usize>,
    },

    /// A dynamically sized shape has the wrong number of axes.
    #[error("expected {expected} dimensions, got {got}")]
    RankMismatch {
        /// The tensor's fixed rank.
        expected: usize,
        /// Number of dimensions supplied.
        got: usize,
    },
}

/// Errors surfaced by layers, losses, optimizers and the training loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A tensor operation failed.
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// `backward` was called on a layer that has not seen a `forward` pass.
    #[error("{layer}: backward called before forward")]
    MissingForwardCache {
        /// Name of the layer.
        layer: &'static str,
    },

    /// A training option is out of its valid range.
    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),

    /// The layer stack cannot be trained with the requested loss.
    #[error("incompatible loss: {0}")]
    IncompatibleLoss(String),

    /// Inputs and targets disagree on the number of samples.
    #[error("inputs have {inputs} samples but targets have {targets}")]
    SampleMismatch {
        /// Rows of the input matrix.
        inputs: usize,
        /// Rows of the target matrix.
        targets: usize,
    },

    /// Training was requested on zero samples.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A weight initializer could not be built.
    #[error("initializer: {0}")]
    Initializer(String),
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
