use super::{Layer, LayerKind};
use crate::error::{Error, Result, TensorError};
use crate::float::TensorFloat;
use crate::nn::init;
use crate::nn::optim::Optimizer;
use crate::nn::param::Param;
use crate::tensors::Tensor;
use rand::Rng;

/// Fully connected layer: `Y = X·W + b`.
///
/// `W` is `in_features × out_features`, `b` is `1 × out_features` and is
/// broadcast over the sample axis.
#[derive(Debug)]
pub struct Dense<T> {
    weight: Param<T>,
    bias: Param<T>,
    input: Option<Tensor<T, 2>>,
}

impl<T: TensorFloat> Dense<T> {
    /// Dense layer with the default policy: weights from
    /// [`init::xavier_normal`], bias zero.
    ///
    /// # Errors
    /// `ShapeOverflow` for absurd feature counts.
    pub fn new<G: Rng>(in_features: usize, out_features: usize, rng: &mut G) -> Result<Self> {
        Self::with_init(
            in_features,
            out_features,
            init::xavier_normal(rng),
            init::zeros(),
        )
    }

    /// Dense layer whose parameters are filled by the given initializers.
    ///
    /// Each initializer receives a zeroed tensor of the final shape and is
    /// expected to overwrite every element.
    ///
    /// # Errors
    /// `ShapeOverflow` for absurd feature counts.
    pub fn with_init(
        in_features: usize,
        out_features: usize,
        mut weight_init: impl FnMut(&mut Tensor<T, 2>),
        mut bias_init: impl FnMut(&mut Tensor<T, 2>),
    ) -> Result<Self> {
        let mut weight = Param::zeros([in_features, out_features])?;
        let mut bias = Param::zeros([1, out_features])?;
        weight_init(&mut weight.value);
        bias_init(&mut bias.value);
        Ok(Self {
            weight,
            bias,
            input: None,
        })
    }

    /// Width of the expected input.
    #[must_use]
    pub const fn in_features(&self) -> usize {
        self.weight.value.rows()
    }

    /// Width of the produced output.
    #[must_use]
    pub const fn out_features(&self) -> usize {
        self.weight.value.cols()
    }

    /// Weight matrix.
    #[must_use]
    pub const fn weight(&self) -> &Tensor<T, 2> {
        &self.weight.value
    }

    /// Mutable weight matrix.
    pub fn weight_mut(&mut self) -> &mut Tensor<T, 2> {
        &mut self.weight.value
    }

    /// Bias row.
    #[must_use]
    pub const fn bias(&self) -> &Tensor<T, 2> {
        &self.bias.value
    }

    /// Mutable bias row.
    pub fn bias_mut(&mut self) -> &mut Tensor<T, 2> {
        &mut self.bias.value
    }

    /// Weight gradient from the last backward pass.
    #[must_use]
    pub const fn weight_grad(&self) -> &Tensor<T, 2> {
        &self.weight.grad
    }

    /// Bias gradient from the last backward pass.
    #[must_use]
    pub const fn bias_grad(&self) -> &Tensor<T, 2> {
        &self.bias.grad
    }
}

impl<T: TensorFloat> Layer<T> for Dense<T> {
    fn forward(&mut self, input: &Tensor<T, 2>) -> Result<Tensor<T, 2>> {
        let out = input.matmul(&self.weight.value)?.broadcast_add(&self.bias.value)?;
        self.input = Some(input.clone());
        Ok(out)
    }

    fn backward(&mut self, grad_output: &Tensor<T, 2>) -> Result<Tensor<T, 2>> {
        let input = self.input.as_ref().ok_or(Error::MissingForwardCache {
            layer: LayerKind::Dense.name(),
        })?;
        let expected = [input.rows(), self.out_features()];
        if grad_output.shape() != &expected {
            return Err(TensorError::ShapeMismatch {
                left: grad_output.shape().to_vec(),
                right: expected.to_vec(),
            }
            .into());
        }

        self.weight.grad = input.transpose()?.matmul(grad_output)?;
        self.bias.grad = grad_output.sum_rows()?;
        Ok(grad_output.matmul(&self.weight.value.transpose()?)?)
    }

    fn update_params(&mut self, optimizer: &mut dyn Optimizer<T>) -> Result<()> {
        optimizer.update_param(&mut self.weight)?;
        optimizer.update_param(&mut self.bias)
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Dense
    }

    fn parameter_count(&self) -> usize {
        self.weight.len() + self.bias.len()
    }
}
