use super::{Layer, LayerKind};
use crate::error::{Error, Result};
use crate::float::TensorFloat;
use crate::tensors::Tensor;

/// Logistic function `1 / (1 + e^-z)`.
#[inline]
pub fn sigmoid<T: TensorFloat>(z: T) -> T {
    T::ONE / (T::ONE + (-z).exp())
}

/// Elementwise logistic activation.
#[derive(Debug, Clone, Default)]
pub struct Sigmoid<T> {
    input: Option<Tensor<T, 2>>,
}

impl<T> Sigmoid<T> {
    /// Fresh layer with an empty input cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { input: None }
    }
}

impl<T: TensorFloat> Layer<T> for Sigmoid<T> {
    fn forward(&mut self, input: &Tensor<T, 2>) -> Result<Tensor<T, 2>> {
        let out = input.map(|&z| sigmoid(z));
        self.input = Some(input.clone());
        Ok(out)
    }

    /// `g * s * (1 - s)` with `s = sigmoid(z)` recomputed from the cached input.
    fn backward(&mut self, grad_output: &Tensor<T, 2>) -> Result<Tensor<T, 2>> {
        let input = self.input.as_ref().ok_or(Error::MissingForwardCache {
            layer: LayerKind::Sigmoid.name(),
        })?;
        Ok(grad_output.zip_map(input, |&g, &z| {
            let s = sigmoid(z);
            g * s * (T::ONE - s)
        })?)
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Sigmoid
    }
}
