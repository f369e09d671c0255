//! Training configuration.

use crate::error::{Error, Result};
use crate::float::TensorFloat;
use crate::nn::loss::LossKind;
use crate::nn::optim::OptimizerKind;

/// Everything [`Network::train`](crate::nn::Network::train) needs besides
/// the data.
///
/// ```rust
/// use tensorflux::nn::{LossKind, OptimizerKind, TrainConfig};
///
/// let config = TrainConfig::new(500, 32, 0.01_f64)
///     .with_loss(LossKind::BinaryCrossEntropy)
///     .with_optimizer(OptimizerKind::adam())
///     .with_shuffle(true)
///     .with_seed(7);
/// assert_eq!(config.log_every, 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig<T> {
    /// Full passes over the data.
    pub epochs: usize,
    /// Samples per mini-batch; the last batch of an epoch may be smaller.
    pub batch_size: usize,
    /// Optimizer step size.
    pub learning_rate: T,
    /// Objective to minimize.
    pub loss: LossKind,
    /// Update rule.
    pub optimizer: OptimizerKind,
    /// Permute the sample order every epoch.
    pub shuffle: bool,
    /// Seed of the shuffling generator.
    pub seed: u64,
    /// Report progress on epoch 1 and every `log_every` epochs; 0 silences it.
    pub log_every: usize,
}

impl<T: TensorFloat> TrainConfig<T> {
    /// Epoch interval between progress reports unless overridden.
    pub const DEFAULT_LOG_EVERY: usize = 50;

    /// Binary cross-entropy with SGD, no shuffling, seed 0.
    #[must_use]
    pub fn new(epochs: usize, batch_size: usize, learning_rate: T) -> Self {
        Self {
            epochs,
            batch_size,
            learning_rate,
            loss: LossKind::default(),
            optimizer: OptimizerKind::default(),
            shuffle: false,
            seed: 0,
            log_every: Self::DEFAULT_LOG_EVERY,
        }
    }

    /// Sets the loss.
    #[must_use]
    pub const fn with_loss(mut self, loss: LossKind) -> Self {
        self.loss = loss;
        self
    }

    /// Sets the optimizer.
    #[must_use]
    pub const fn with_optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Enables or disables per-epoch shuffling.
    #[must_use]
    pub const fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the shuffle seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the report interval in epochs; 0 disables progress logs.
    #[must_use]
    pub const fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    /// Checks the settings that do not depend on the data or the network.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] for a zero batch size, a non-finite or
    /// non-positive learning rate, or Adam hyperparameters outside
    /// `0 <= beta < 1`, `epsilon > 0`.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch size must be positive".into()));
        }
        let lr = self.learning_rate.into_f64();
        if !lr.is_finite() || lr <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be positive and finite, got {lr}"
            )));
        }
        if let OptimizerKind::Adam {
            beta1,
            beta2,
            epsilon,
        } = self.optimizer
        {
            let decay = 0.0..1.0;
            if !decay.contains(&beta1) || !decay.contains(&beta2) {
                return Err(Error::InvalidConfig(format!(
                    "adam decay rates must lie in [0, 1), got beta1={beta1}, beta2={beta2}"
                )));
            }
            if !epsilon.is_finite() || epsilon <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "adam epsilon must be positive, got {epsilon}"
                )));
            }
        }
        Ok(())
    }
}
