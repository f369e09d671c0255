//! Raw numeric kernels behind the tensor API.
//!
//! - [`cpu`] holds the matrix-product kernels working on flat slices.
//! - [`dispatch`] picks one according to the global [`Backend`](crate::backend::Backend).

pub mod cpu;
pub mod dispatch;
