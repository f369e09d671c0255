use super::{Layer, LayerKind};
use crate::error::{Error, Result};
use crate::float::TensorFloat;
use crate::tensors::Tensor;

/// Row-wise softmax with max subtraction for stability.
///
/// The backward pass is the identity. This is only correct when the layer
/// is last and trained with categorical cross-entropy, whose gradient
/// already accounts for the softmax Jacobian; [`Network::train`] rejects any
/// other arrangement.
///
/// [`Network::train`]: crate::nn::Network::train
#[derive(Debug, Clone, Default)]
pub struct Softmax<T> {
    input: Option<Tensor<T, 2>>,
}

impl<T> Softmax<T> {
    /// Fresh layer with an empty input cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { input: None }
    }
}

impl<T: TensorFloat> Layer<T> for Softmax<T> {
    fn forward(&mut self, input: &Tensor<T, 2>) -> Result<Tensor<T, 2>> {
        let mut out = input.clone();
        let cols = out.cols();
        if cols > 0 {
            for row in out.data_mut().chunks_mut(cols) {
                let max = row.iter().fold(row[0], |m, &x| m.max_of(x));
                let mut total = T::ZERO;
                for x in row.iter_mut() {
                    *x = (*x - max).exp();
                    total += *x;
                }
                for x in row.iter_mut() {
                    *x /= total;
                }
            }
        }
        self.input = Some(input.clone());
        Ok(out)
    }

    fn backward(&mut self, grad_output: &Tensor<T, 2>) -> Result<Tensor<T, 2>> {
        let input = self.input.as_ref().ok_or(Error::MissingForwardCache {
            layer: LayerKind::Softmax.name(),
        })?;
        Ok(grad_output.zip_map(input, |&g, _| g)?)
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Softmax
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor;

    #[test]
    fn rows_sum_to_one() {
        let mut layer = Softmax::<f64>::new();
        let x: Tensor<f64, 2> = tensor!([[1.0, 2.0, 3.0], [1000.0, 1000.0, 1000.0]]);
        let y = layer.forward(&x).unwrap();
        for r in 0..2 {
            let sum: f64 = y.row(r).unwrap().iter().sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
        assert!((y[3] - 1.0 / 3.0).abs() < 1e-12);
        assert!(y[2] > y[1] && y[1] > y[0]);
    }

    #[test]
    fn backward_passes_gradient_through() {
        let mut layer = Softmax::<f64>::new();
        let x: Tensor<f64, 2> = tensor!([[0.0, 1.0]]);
        layer.forward(&x).unwrap();
        let g: Tensor<f64, 2> = tensor!([[0.3, -0.3]]);
        assert_eq!(layer.backward(&g).unwrap(), g);
    }
}
