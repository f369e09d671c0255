use super::{Layer, LayerKind};
use crate::error::{Error, Result};
use crate::float::TensorFloat;
use crate::tensors::Tensor;

/// `max(0, z)` applied elementwise.
#[derive(Debug, Clone, Default)]
pub struct Relu<T> {
    input: Option<Tensor<T, 2>>,
}

impl<T> Relu<T> {
    /// Fresh layer with an empty input cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { input: None }
    }
}

impl<T: TensorFloat> Layer<T> for Relu<T> {
    fn forward(&mut self, input: &Tensor<T, 2>) -> Result<Tensor<T, 2>> {
        let out = input.map(|&z| if z > T::ZERO { z } else { T::ZERO });
        self.input = Some(input.clone());
        Ok(out)
    }

    /// Gradient passes where the cached input was strictly positive.
    fn backward(&mut self, grad_output: &Tensor<T, 2>) -> Result<Tensor<T, 2>> {
        let input = self.input.as_ref().ok_or(Error::MissingForwardCache {
            layer: LayerKind::Relu.name(),
        })?;
        Ok(grad_output.zip_map(input, |&g, &z| if z > T::ZERO { g } else { T::ZERO })?)
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Relu
    }
}
