use super::{Optimizer, ensure_same_shape};
use crate::error::Result;
use crate::float::TensorFloat;
use crate::nn::param::ParamId;
use crate::tensors::Tensor;

/// Stochastic gradient descent: `w := w - lr * dL/dw`.
#[derive(Debug, Clone, Copy)]
pub struct Sgd<T> {
    lr: T,
}

impl<T: TensorFloat> Sgd<T> {
    /// Plain SGD with a fixed learning rate.
    #[must_use]
    pub const fn new(learning_rate: T) -> Self {
        Self { lr: learning_rate }
    }
}

impl<T: TensorFloat> Optimizer<T> for Sgd<T> {
    fn update(&mut self, _id: ParamId, param: &mut Tensor<T, 2>, grad: &Tensor<T, 2>) -> Result<()> {
        ensure_same_shape(param, grad)?;
        for (w, &g) in param.iter_mut().zip(grad) {
            *w -= self.lr * g;
        }
        Ok(())
    }

    fn learning_rate(&self) -> T {
        self.lr
    }
}
