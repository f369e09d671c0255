use super::{Loss, ensure_same_shape};
use crate::error::Result;
use crate::float::TensorFloat;
use crate::tensors::Tensor;

const CLAMP: f64 = 1e-15;

/// Categorical cross-entropy over row-wise probability distributions.
///
/// Only entries with a positive target contribute to the loss. The gradient
/// `(p - t) / rows` is the combined softmax-and-CCE gradient with respect to
/// the logits, which is why [`Softmax`](crate::nn::layers::Softmax) passes
/// gradients through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalCrossEntropy;

impl<T: TensorFloat> Loss<T> for CategoricalCrossEntropy {
    fn evaluate(&self, prediction: &Tensor<T, 2>, target: &Tensor<T, 2>) -> Result<(T, Tensor<T, 2>)> {
        ensure_same_shape(prediction, target)?;
        let rows = prediction.rows();
        if rows == 0 {
            return Ok((T::ZERO, prediction.clone()));
        }
        let n = T::from_usize(rows);
        let lo = T::from_f64(CLAMP);
        let hi = T::ONE - lo;

        let mut total = T::ZERO;
        for (&p, &t) in prediction.iter().zip(target) {
            if t > T::ZERO {
                total -= t * p.clamp_to(lo, hi).ln();
            }
        }
        let grad = prediction.zip_map(target, |&p, &t| (p.clamp_to(lo, hi) - t) / n)?;
        Ok((total / n, grad))
    }
}
