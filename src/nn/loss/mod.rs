//! Loss functions.
//!
//! A loss compares a `samples × outputs` prediction against a target of the
//! same shape and yields the scalar loss together with `dL/d(prediction)`.
//! Gradients are already normalized, so layers never divide by the batch
//! size themselves.

use crate::error::{Result, TensorError};
use crate::float::TensorFloat;
use crate::tensors::Tensor;
use core::fmt;

mod binary_cross_entropy;
pub use self::binary_cross_entropy::BinaryCrossEntropy;

mod cross_entropy;
pub use self::cross_entropy::CategoricalCrossEntropy;

mod mse;
pub use self::mse::Mse;

/// A differentiable scalar objective.
pub trait Loss<T: TensorFloat> {
    /// Loss value and gradient with respect to `prediction`.
    ///
    /// # Errors
    /// `ShapeMismatch` if `prediction` and `target` differ in shape.
    fn evaluate(&self, prediction: &Tensor<T, 2>, target: &Tensor<T, 2>) -> Result<(T, Tensor<T, 2>)>;
}

/// Selects a built-in loss by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LossKind {
    /// Mean squared error.
    Mse,
    /// Binary cross-entropy over probabilities.
    #[default]
    BinaryCrossEntropy,
    /// Categorical cross-entropy over row-wise distributions.
    CategoricalCrossEntropy,
}

impl LossKind {
    /// Evaluates the selected loss.
    ///
    /// # Errors
    /// `ShapeMismatch` if `prediction` and `target` differ in shape.
    pub fn evaluate<T: TensorFloat>(
        self,
        prediction: &Tensor<T, 2>,
        target: &Tensor<T, 2>,
    ) -> Result<(T, Tensor<T, 2>)> {
        match self {
            Self::Mse => Mse.evaluate(prediction, target),
            Self::BinaryCrossEntropy => BinaryCrossEntropy.evaluate(prediction, target),
            Self::CategoricalCrossEntropy => CategoricalCrossEntropy.evaluate(prediction, target),
        }
    }
}

impl fmt::Display for LossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mse => "mse",
            Self::BinaryCrossEntropy => "binary cross-entropy",
            Self::CategoricalCrossEntropy => "categorical cross-entropy",
        })
    }
}

fn ensure_same_shape<T>(prediction: &Tensor<T, 2>, target: &Tensor<T, 2>) -> Result<(), TensorError> {
    if prediction.shape() == target.shape() {
        Ok(())
    } else {
        Err(TensorError::ShapeMismatch {
            left: prediction.shape().to_vec(),
            right: target.shape().to_vec(),
        })
    }
}
