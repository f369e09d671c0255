//! Operation dispatch layer.
//!
//! Selects the matrix-product kernel at runtime from the global
//! [`Backend`]. Callers hand over validated extents; this layer only routes.

use crate::backend::{Backend, get_backend};
use crate::float::TensorFloat;
use crate::ops::cpu::{self, MatmulDims};

/// Dispatches a batched matrix product to the active kernel.
///
/// `out` must already hold `dims.output_len()` elements.
pub fn matmul<T: TensorFloat>(a: &[T], b: &[T], out: &mut [T], dims: MatmulDims) {
    match get_backend() {
        Backend::Parallel => cpu::matmul_parallel(a, b, out, dims),
        Backend::Sequential => cpu::matmul_sequential(a, b, out, dims),
    }
}
