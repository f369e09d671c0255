//! tensorflux: a minimal tensor algebra and feed-forward network engine.
//!
//! Fixed-rank dense tensors with broadcasting and a batched matrix product,
//! plus just enough neural-network machinery to train small multilayer
//! perceptrons with hand-written backpropagation.
//!
//! # Features
//!
//! - `Tensor<T, R>`: rank fixed at compile time, extents chosen at run time.
//! - Broadcasting elementwise arithmetic, scalar arithmetic, transpose,
//!   row reduction and reshape.
//! - Matrix product with a sequential and a rayon-parallel kernel that give
//!   identical results, selected process-wide through [`backend`].
//! - Dense, ReLU, Sigmoid and Softmax layers; MSE, binary and categorical
//!   cross-entropy; SGD and Adam.
//! - Reproducible initialization and shuffling through seeded generators.
//!
//! # Modules
//!
//! - [`tensors`]: the tensor type and its operations.
//! - [`backend`] / [`ops`]: kernel selection and the matrix product kernels.
//! - [`nn`]: layers, losses, optimizers and the training loop.
//! - [`error`]: error types shared by everything above.
//!
//! # Example
//!
//! ```rust
//! use tensorflux::nn::{LossKind, Network, TrainConfig, metrics};
//! use tensorflux::tensor;
//! use tensorflux::tensors::Tensor;
//!
//! let x: Tensor<f64, 2> = tensor!([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
//! let y: Tensor<f64, 2> = tensor!([[0.0], [1.0], [1.0], [0.0]]);
//!
//! let mut net = Network::<f64>::with_seed(42);
//! net.add_dense(2, 16)?.add_relu().add_dense(16, 1)?.add_sigmoid();
//!
//! let config = TrainConfig::new(20, 4, 0.1).with_loss(LossKind::BinaryCrossEntropy);
//! let losses = net.train(&x, &y, &config)?;
//! assert_eq!(losses.len(), 20);
//!
//! let acc = metrics::binary_accuracy(&net.predict(&x)?, &y, 0.5)?;
//! assert!((0.0..=1.0).contains(&acc));
//! # Ok::<(), tensorflux::Error>(())
//! ```

pub mod backend;
pub mod error;
pub mod float;
pub mod nn;
pub mod ops;
pub mod tensors;

pub use error::{Error, Result, TensorError};
pub use float::TensorFloat;
pub use tensors::Tensor;
