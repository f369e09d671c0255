//! Sequential layer stack and its training loop.

use crate::error::{Error, Result};
use crate::float::TensorFloat;
use crate::nn::config::TrainConfig;
use crate::nn::layers::{Dense, Layer, LayerKind, Relu, Sigmoid, Softmax};
use crate::nn::loss::LossKind;
use crate::nn::optim::Optimizer;
use crate::tensors::Tensor;
use core::fmt;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Instant;

/// A feed-forward network: layers applied in insertion order.
///
/// # Example
///
/// ```rust
/// use tensorflux::nn::{LossKind, Network, TrainConfig};
/// use tensorflux::tensor;
/// use tensorflux::tensors::Tensor;
///
/// let mut net = Network::<f64>::with_seed(1);
/// net.add_dense(2, 8).unwrap().add_relu().add_dense(8, 1).unwrap().add_sigmoid();
///
/// let x: Tensor<f64, 2> = tensor!([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
/// let y: Tensor<f64, 2> = tensor!([[0.0], [1.0], [1.0], [0.0]]);
/// let losses = net.train(&x, &y, &TrainConfig::new(10, 4, 0.1)).unwrap();
/// assert_eq!(losses.len(), 10);
/// assert_eq!(net.predict(&x).unwrap().shape(), &[4, 1]);
/// ```
pub struct Network<T: TensorFloat> {
    layers: Vec<Box<dyn Layer<T>>>,
    rng: StdRng,
}

impl<T: TensorFloat> Network<T> {
    /// Empty network whose default initializers draw from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Empty network whose default initializers are reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            layers: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Appends a layer.
    pub fn add_layer<L: Layer<T> + 'static>(&mut self, layer: L) -> &mut Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Appends a [`Dense`] layer with the default initialization, drawing
    /// from this network's generator.
    ///
    /// # Errors
    /// `ShapeOverflow` for absurd feature counts.
    pub fn add_dense(&mut self, in_features: usize, out_features: usize) -> Result<&mut Self> {
        let layer = Dense::new(in_features, out_features, &mut self.rng)?;
        Ok(self.add_layer(layer))
    }

    /// Appends a [`Dense`] layer filled by the given initializers.
    ///
    /// # Errors
    /// `ShapeOverflow` for absurd feature counts.
    pub fn add_dense_with_init(
        &mut self,
        in_features: usize,
        out_features: usize,
        weight_init: impl FnMut(&mut Tensor<T, 2>),
        bias_init: impl FnMut(&mut Tensor<T, 2>),
    ) -> Result<&mut Self> {
        let layer = Dense::with_init(in_features, out_features, weight_init, bias_init)?;
        Ok(self.add_layer(layer))
    }

    /// Appends a [`Relu`].
    pub fn add_relu(&mut self) -> &mut Self {
        self.add_layer(Relu::new())
    }

    /// Appends a [`Sigmoid`].
    pub fn add_sigmoid(&mut self) -> &mut Self {
        self.add_layer(Sigmoid::new())
    }

    /// Appends a [`Softmax`]. Training then requires it to stay the last
    /// layer and the loss to be categorical cross-entropy.
    pub fn add_softmax(&mut self) -> &mut Self {
        self.add_layer(Softmax::new())
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True if no layer has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Kinds of the layers, in forward order.
    pub fn layer_kinds(&self) -> impl Iterator<Item = LayerKind> + '_ {
        self.layers.iter().map(|l| l.kind())
    }

    /// Total number of learnable scalars.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(|l| l.parameter_count()).sum()
    }

    /// Runs every layer forward.
    ///
    /// Layers cache their inputs, so this takes `&mut self`.
    ///
    /// # Errors
    /// Propagates shape errors, e.g. an input width that does not match the
    /// first [`Dense`] layer.
    pub fn predict(&mut self, input: &Tensor<T, 2>) -> Result<Tensor<T, 2>> {
        let mut out = input.clone();
        for layer in &mut self.layers {
            out = layer.forward(&out)?;
        }
        Ok(out)
    }

    /// Loss of the current parameters on `(input, target)`.
    ///
    /// # Errors
    /// Propagates shape errors from the forward pass or the loss.
    pub fn evaluate(&mut self, input: &Tensor<T, 2>, target: &Tensor<T, 2>, loss: LossKind) -> Result<T> {
        let prediction = self.predict(input)?;
        Ok(loss.evaluate(&prediction, target)?.0)
    }

    /// Trains on `(input, target)` and returns the mean batch loss of every
    /// epoch.
    ///
    /// Each epoch walks the samples in mini-batches of
    /// `config.batch_size`: forward, loss, backward in reverse order, one
    /// optimizer step, then every layer updates its parameters. Without
    /// `shuffle` the batches are contiguous and in order.
    ///
    /// # Errors
    /// - [`Error::InvalidConfig`] from [`TrainConfig::validate`].
    /// - [`Error::SampleMismatch`] if the row counts differ.
    /// - [`Error::EmptyDataset`] for zero samples.
    /// - [`Error::IncompatibleLoss`] for a misplaced [`Softmax`] or one not
    ///   paired with categorical cross-entropy.
    /// - Any layer, loss or optimizer error, which aborts the call with the
    ///   parameters as they were after the last completed batch.
    pub fn train(
        &mut self,
        input: &Tensor<T, 2>,
        target: &Tensor<T, 2>,
        config: &TrainConfig<T>,
    ) -> Result<Vec<T>> {
        config.validate()?;
        self.check_loss_pairing(config.loss)?;
        let samples = input.rows();
        if target.rows() != samples {
            return Err(Error::SampleMismatch {
                inputs: samples,
                targets: target.rows(),
            });
        }
        if samples == 0 {
            return Err(Error::EmptyDataset);
        }

        debug!(
            "training {} layers ({} parameters) on {samples} samples: {config:?}",
            self.len(),
            self.parameter_count()
        );

        let mut optimizer = config.optimizer.build(config.learning_rate);
        let mut shuffler = StdRng::seed_from_u64(config.seed);
        let mut order: Vec<usize> = (0..samples).collect();
        let batches = T::from_usize(samples.div_ceil(config.batch_size));

        let mut losses = Vec::with_capacity(config.epochs);
        let mut last_report = Instant::now();
        for epoch in 1..=config.epochs {
            if config.shuffle {
                order.shuffle(&mut shuffler);
            }

            let mut total = T::ZERO;
            for chunk in order.chunks(config.batch_size) {
                let (x, y) = if config.shuffle {
                    (input.select_rows(chunk)?, target.select_rows(chunk)?)
                } else {
                    let start = chunk[0];
                    let end = start + chunk.len();
                    (input.slice_rows(start, end)?, target.slice_rows(start, end)?)
                };
                total += self.train_batch(&x, &y, config.loss, optimizer.as_mut())?;
            }

            let mean = total / batches;
            losses.push(mean);

            if config.log_every > 0 && (epoch == 1 || epoch % config.log_every == 0) {
                let now = Instant::now();
                info!(
                    "epoch {epoch}/{} - mean loss {mean} - {:.3}s since last report",
                    config.epochs,
                    now.duration_since(last_report).as_secs_f64()
                );
                last_report = now;
            }
        }
        Ok(losses)
    }

    fn train_batch(
        &mut self,
        input: &Tensor<T, 2>,
        target: &Tensor<T, 2>,
        loss: LossKind,
        optimizer: &mut dyn Optimizer<T>,
    ) -> Result<T> {
        let prediction = self.predict(input)?;
        let (value, mut grad) = loss.evaluate(&prediction, target)?;
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad)?;
        }
        optimizer.step();
        for layer in &mut self.layers {
            layer.update_params(optimizer)?;
        }
        Ok(value)
    }

    fn check_loss_pairing(&self, loss: LossKind) -> Result<()> {
        let last = self.layers.len().saturating_sub(1);
        for (i, kind) in self.layer_kinds().enumerate() {
            if kind != LayerKind::Softmax {
                continue;
            }
            if i != last {
                return Err(Error::IncompatibleLoss(format!(
                    "softmax must be the last layer, found at position {i} of {}",
                    self.len()
                )));
            }
            if loss != LossKind::CategoricalCrossEntropy {
                return Err(Error::IncompatibleLoss(format!(
                    "softmax output must be trained with categorical cross-entropy, not {loss}"
                )));
            }
        }
        Ok(())
    }
}

impl<T: TensorFloat> Default for Network<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TensorFloat> fmt::Debug for Network<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("layers", &self.layer_kinds().collect::<Vec<_>>())
            .field("parameters", &self.parameter_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor;

    #[test]
    fn counts_parameters() {
        let mut net = Network::<f32>::with_seed(0);
        net.add_dense(2, 3).unwrap().add_relu().add_dense(3, 1).unwrap();
        assert_eq!(net.len(), 3);
        assert_eq!(net.parameter_count(), (2 * 3 + 3) + (3 + 1));
    }

    #[test]
    fn softmax_must_be_last() {
        let mut net = Network::<f64>::with_seed(0);
        net.add_dense(2, 2).unwrap().add_softmax().add_relu();
        let x: Tensor<f64, 2> = tensor!([[1.0, 0.0]]);
        let y: Tensor<f64, 2> = tensor!([[1.0, 0.0]]);
        let config = TrainConfig::new(1, 1, 0.1).with_loss(LossKind::CategoricalCrossEntropy);
        assert!(matches!(
            net.train(&x, &y, &config),
            Err(Error::IncompatibleLoss(_))
        ));
    }

    #[test]
    fn empty_dataset() {
        let mut net = Network::<f64>::with_seed(0);
        net.add_dense(2, 1).unwrap();
        let x = Tensor::<f64, 2>::zeros([0, 2]).unwrap();
        let y = Tensor::<f64, 2>::zeros([0, 1]).unwrap();
        let config = TrainConfig::new(1, 1, 0.1).with_loss(LossKind::Mse);
        assert_eq!(net.train(&x, &y, &config), Err(Error::EmptyDataset));
    }

    #[test]
    fn debug_lists_layer_kinds() {
        let mut net = Network::<f64>::with_seed(0);
        net.add_dense(1, 1).unwrap().add_sigmoid();
        let s = format!("{net:?}");
        assert!(s.contains("Dense"));
        assert!(s.contains("Sigmoid"));
    }
}
