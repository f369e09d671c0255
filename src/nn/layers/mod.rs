//! Differentiable layers.
//!
//! Every layer maps a `samples × features` matrix forward and maps the
//! upstream gradient backward, using whatever it cached during `forward`.
//! Backpropagation is manual: each layer knows its own local derivative.
//!
//! | layer       | parameters      | cache            |
//! |-------------|-----------------|------------------|
//! | [`Dense`]   | weight, bias    | input            |
//! | [`Relu`]    | none            | pre-activation   |
//! | [`Sigmoid`] | none            | pre-activation   |
//! | [`Softmax`] | none            | input            |

use crate::error::Result;
use crate::float::TensorFloat;
use crate::nn::optim::Optimizer;
use crate::tensors::Tensor;
use core::fmt;

mod dense;
pub use self::dense::Dense;

mod relu;
pub use self::relu::Relu;

mod sigmoid;
pub use self::sigmoid::{Sigmoid, sigmoid};

mod softmax;
pub use self::softmax::Softmax;

/// Identifies a concrete layer type behind a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Fully connected affine map.
    Dense,
    /// Rectified linear unit.
    Relu,
    /// Logistic sigmoid.
    Sigmoid,
    /// Row-wise softmax.
    Softmax,
}

impl LayerKind {
    /// Human-readable name, also used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dense => "Dense",
            Self::Relu => "ReLU",
            Self::Sigmoid => "Sigmoid",
            Self::Softmax => "Softmax",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A unit of a linear layer stack.
///
/// A layer caches what it needs during [`forward`](Layer::forward) and
/// consumes it in [`backward`](Layer::backward). Only one batch may be in
/// flight per layer: a second `forward` overwrites the cache.
pub trait Layer<T: TensorFloat>: Send {
    /// Evaluates the layer on `input` (`samples × in`).
    ///
    /// # Errors
    /// Propagates tensor shape errors.
    fn forward(&mut self, input: &Tensor<T, 2>) -> Result<Tensor<T, 2>>;

    /// Maps `dL/d(output)` to `dL/d(input)`, storing parameter gradients.
    ///
    /// # Errors
    /// `MissingForwardCache` before the first `forward`; shape errors if
    /// `grad_output` does not match the last output.
    fn backward(&mut self, grad_output: &Tensor<T, 2>) -> Result<Tensor<T, 2>>;

    /// Applies the stored gradients through `optimizer`. No-op for layers
    /// without parameters.
    ///
    /// # Errors
    /// Propagates optimizer errors.
    fn update_params(&mut self, _optimizer: &mut dyn Optimizer<T>) -> Result<()> {
        Ok(())
    }

    /// Which concrete layer this is.
    fn kind(&self) -> LayerKind;

    /// Number of learnable scalars.
    fn parameter_count(&self) -> usize {
        0
    }
}
