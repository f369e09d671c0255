//! Parameter update rules.
//!
//! Layers hand each of their parameters to an [`Optimizer`] together with the
//! parameter's [`ParamId`]. Stateless rules ignore the id; stateful ones key
//! their buffers on it.

use crate::error::{Result, TensorError};
use crate::float::TensorFloat;
use crate::nn::param::{Param, ParamId};
use crate::tensors::Tensor;

mod adam;
pub use self::adam::Adam;

mod sgd;
pub use self::sgd::Sgd;

/// An in-place gradient update rule.
pub trait Optimizer<T: TensorFloat>: Send {
    /// Advances the logical step counter. Called once per mini-batch, before
    /// any `update` of that batch.
    fn step(&mut self) {}

    /// Updates `param` in place from a gradient of the same shape.
    ///
    /// # Errors
    /// `ShapeMismatch` if `param` and `grad` differ in shape; stateful rules
    /// may reject a shape change under an existing `id`.
    fn update(&mut self, id: ParamId, param: &mut Tensor<T, 2>, grad: &Tensor<T, 2>) -> Result<()>;

    /// Updates a [`Param`] from its own gradient buffer.
    ///
    /// # Errors
    /// See [`update`](Optimizer::update).
    fn update_param(&mut self, param: &mut Param<T>) -> Result<()> {
        let (id, value, grad) = param.split_mut();
        self.update(id, value, grad)
    }

    /// Step size.
    fn learning_rate(&self) -> T;
}

/// Selects a built-in optimizer by value; the learning rate is supplied at
/// [`build`](OptimizerKind::build) time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OptimizerKind {
    /// Plain stochastic gradient descent.
    #[default]
    Sgd,
    /// Adam with explicit hyperparameters.
    Adam {
        /// Decay of the first moment.
        beta1: f64,
        /// Decay of the second moment.
        beta2: f64,
        /// Denominator guard.
        epsilon: f64,
    },
}

impl OptimizerKind {
    /// Adam with `beta1 = 0.9`, `beta2 = 0.999`, `epsilon = 1e-8`.
    #[must_use]
    pub const fn adam() -> Self {
        Self::Adam {
            beta1: adam::BETA1,
            beta2: adam::BETA2,
            epsilon: adam::EPSILON,
        }
    }

    /// Instantiates the optimizer.
    #[must_use]
    pub fn build<T: TensorFloat>(self, learning_rate: T) -> Box<dyn Optimizer<T>> {
        match self {
            Self::Sgd => Box::new(Sgd::new(learning_rate)),
            Self::Adam {
                beta1,
                beta2,
                epsilon,
            } => Box::new(Adam::with_hyperparameters(
                learning_rate,
                T::from_f64(beta1),
                T::from_f64(beta2),
                T::from_f64(epsilon),
            )),
        }
    }
}

fn ensure_same_shape<T>(param: &Tensor<T, 2>, grad: &Tensor<T, 2>) -> Result<(), TensorError> {
    if param.shape() == grad.shape() {
        Ok(())
    } else {
        Err(TensorError::ShapeMismatch {
            left: param.shape().to_vec(),
            right: grad.shape().to_vec(),
        })
    }
}
