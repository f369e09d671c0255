use super::{Loss, ensure_same_shape};
use crate::error::Result;
use crate::float::TensorFloat;
use crate::tensors::Tensor;

const CLAMP: f64 = 1e-7;

/// BCE for predictions that are already probabilities (e.g. after a
/// [`Sigmoid`](crate::nn::layers::Sigmoid) layer).
///
/// Predictions are clamped to `[1e-7, 1 - 1e-7]` before the logarithm and
/// in the gradient denominator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCrossEntropy;

impl<T: TensorFloat> Loss<T> for BinaryCrossEntropy {
    fn evaluate(&self, prediction: &Tensor<T, 2>, target: &Tensor<T, 2>) -> Result<(T, Tensor<T, 2>)> {
        ensure_same_shape(prediction, target)?;
        if prediction.is_empty() {
            return Ok((T::ZERO, prediction.clone()));
        }
        let n = T::from_usize(prediction.len());
        let lo = T::from_f64(CLAMP);
        let hi = T::ONE - lo;

        let mut total = T::ZERO;
        for (&p, &t) in prediction.iter().zip(target) {
            let p = p.clamp_to(lo, hi);
            total -= t * p.ln() + (T::ONE - t) * (T::ONE - p).ln();
        }
        let grad = prediction.zip_map(target, |&p, &t| {
            let p = p.clamp_to(lo, hi);
            (p - t) / (p * (T::ONE - p) * n)
        })?;
        Ok((total / n, grad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, TensorError};
    use crate::tensor;

    #[test]
    fn perfect_prediction_is_near_zero() {
        let p: Tensor<f64, 2> = tensor!([[1.0], [0.0], [1.0]]);
        let (loss, _) = BinaryCrossEntropy.evaluate(&p, &p).unwrap();
        assert!(loss >= 0.0);
        assert!(loss < 1e-6);
    }

    #[test]
    fn never_negative() {
        let p: Tensor<f64, 2> = tensor!([[0.2, 0.9], [0.5, 0.01]]);
        let t: Tensor<f64, 2> = tensor!([[1.0, 0.0], [0.5, 1.0]]);
        let (loss, grad) = BinaryCrossEntropy.evaluate(&p, &t).unwrap();
        assert!(loss > 0.0);
        assert!(grad.iter().all(|g| g.is_finite()));
    }

    #[test]
    fn gradient_at_one_half() {
        let p: Tensor<f64, 2> = tensor!([[0.5, 0.5]]);
        let t: Tensor<f64, 2> = tensor!([[1.0, 0.0]]);
        let (loss, grad) = BinaryCrossEntropy.evaluate(&p, &t).unwrap();
        assert!((loss - core::f64::consts::LN_2).abs() < 1e-12);
        assert_eq!(grad.data(), &[-1.0, 1.0]);
    }

    #[test]
    fn shapes_must_agree() {
        let p: Tensor<f32, 2> = tensor!([[0.5, 0.5]]);
        let t: Tensor<f32, 2> = tensor!([[1.0], [0.0]]);
        assert!(matches!(
            BinaryCrossEntropy.evaluate(&p, &t),
            Err(Error::Tensor(TensorError::ShapeMismatch { .. }))
        ));
    }
}
