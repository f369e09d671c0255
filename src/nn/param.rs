//! Learnable tensors and their identities.

use crate::error::TensorError;
use crate::float::TensorFloat;
use crate::tensors::Tensor;
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque, process-unique identity of a learnable tensor.
///
/// Stateful optimizers key their per-parameter buffers on this value, so two
/// parameters never share moment estimates even when they have equal shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(u64);

impl ParamId {
    /// Allocates a fresh identity.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A learnable matrix paired with its gradient buffer.
///
/// Not `Clone`: each identity belongs to exactly one parameter.
#[derive(Debug)]
pub struct Param<T> {
    id: ParamId,
    /// Current parameter values.
    pub value: Tensor<T, 2>,
    /// Gradient from the most recent backward pass, same shape as `value`.
    pub grad: Tensor<T, 2>,
}

impl<T: TensorFloat> Param<T> {
    /// Zero-valued parameter with a zero gradient and a fresh identity.
    ///
    /// # Errors
    /// `ShapeOverflow` if the shape overflows.
    pub fn zeros(shape: [usize; 2]) -> Result<Self, TensorError> {
        Ok(Self {
            id: ParamId::fresh(),
            value: Tensor::zeros(shape)?,
            grad: Tensor::zeros(shape)?,
        })
    }

    /// This parameter's identity.
    #[must_use]
    pub const fn id(&self) -> ParamId {
        self.id
    }

    /// Number of scalar weights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// `true` for a zero-sized parameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Value, gradient and identity borrowed at once, as optimizers need them.
    pub fn split_mut(&mut self) -> (ParamId, &mut Tensor<T, 2>, &Tensor<T, 2>) {
        (self.id, &mut self.value, &self.grad)
    }
}
