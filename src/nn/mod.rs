//! Feed-forward networks with manual backpropagation.
//!
//! A [`Network`] is a flat list of [`Layer`] trait objects. Training wires
//! the pieces together per mini-batch:
//!
//! 1. every layer runs `forward` in order, caching what its gradient needs;
//! 2. a [`LossKind`] turns prediction and target into a scalar and a gradient;
//! 3. every layer runs `backward` in reverse order;
//! 4. the [`Optimizer`] advances one step and each layer hands it its
//!    [`Param`]s.
//!
//! Nothing here is shared between threads: one network is driven by one
//! caller. Parallelism lives only inside the matrix product kernel.

pub mod config;
pub mod init;
pub mod layers;
pub mod loss;
pub mod metrics;
pub mod network;
pub mod optim;
pub mod param;

pub use self::config::TrainConfig;
pub use self::layers::{Dense, Layer, LayerKind, Relu, Sigmoid, Softmax};
pub use self::loss::{Loss, LossKind};
pub use self::network::Network;
pub use self::optim::{Adam, Optimizer, OptimizerKind, Sgd};
pub use self::param::{Param, ParamId};
