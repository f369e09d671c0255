use super::{Loss, ensure_same_shape};
use crate::error::Result;
use crate::float::TensorFloat;
use crate::tensors::Tensor;

/// Mean squared error over every element.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mse;

impl<T: TensorFloat> Loss<T> for Mse {
    fn evaluate(&self, prediction: &Tensor<T, 2>, target: &Tensor<T, 2>) -> Result<(T, Tensor<T, 2>)> {
        ensure_same_shape(prediction, target)?;
        if prediction.is_empty() {
            return Ok((T::ZERO, prediction.clone()));
        }
        let n = T::from_usize(prediction.len());
        let two = T::from_f64(2.0);

        let loss = prediction
            .iter()
            .zip(target)
            .map(|(&p, &t)| (p - t) * (p - t))
            .sum::<T>()
            / n;
        let grad = prediction.zip_map(target, |&p, &t| two * (p - t) / n)?;
        Ok((loss, grad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor;

    #[test]
    fn value_and_gradient() {
        let p: Tensor<f64, 2> = tensor!([[1.0, 2.0], [3.0, 4.0]]);
        let t: Tensor<f64, 2> = tensor!([[1.0, 0.0], [3.0, 2.0]]);
        let (loss, grad) = Mse.evaluate(&p, &t).unwrap();
        assert_eq!(loss, 2.0);
        assert_eq!(grad.data(), &[0.0, 1.0, 0.0, 1.0]);
    }
}
