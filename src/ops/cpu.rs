//! CPU matrix-product kernels.
//!
//! Both kernels work on flat row-major slices and compute a (possibly
//! batched) product `C[b] = A[b] × B[b]` with `A[b]: m×k`, `B[b]: k×n`.
//!
//! ## Design Goals
//!
//! - Deterministic results: every output element is one sequential
//!   dot-product accumulation, whichever kernel runs it
//! - The parallel kernel splits the output into disjoint rows with
//!   [`rayon`](https://docs.rs/rayon); workers share nothing mutable
//! - Shape checking lives in the caller; these functions trust `dims`

use crate::float::TensorFloat;
use rayon::prelude::*;

/// Extents of a batched matrix product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatmulDims {
    /// Number of independent matrix pairs.
    pub batch: usize,
    /// Rows of each left operand.
    pub m: usize,
    /// Shared inner extent.
    pub k: usize,
    /// Columns of each right operand.
    pub n: usize,
}

impl MatmulDims {
    /// Number of elements the output buffer must hold.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        self.batch * self.m * self.n
    }
}

/// Fills output row `r` (counted across all batches).
#[inline]
fn row_kernel<T: TensorFloat>(r: usize, row: &mut [T], a: &[T], b: &[T], dims: MatmulDims) {
    let MatmulDims { m, k, n, .. } = dims;
    let b_offset = (r / m) * k * n;
    let a_row = &a[r * k..(r + 1) * k];

    for (j, slot) in row.iter_mut().enumerate() {
        let mut sum = T::ZERO;
        for (l, &x) in a_row.iter().enumerate() {
            sum += x * b[b_offset + l * n + j];
        }
        *slot = sum;
    }
}

/// Single-threaded batched product.
///
/// # Panics
/// Panics if a slice is shorter than `dims` implies.
pub fn matmul_sequential<T: TensorFloat>(a: &[T], b: &[T], out: &mut [T], dims: MatmulDims) {
    if dims.n == 0 {
        return;
    }
    out.chunks_mut(dims.n)
        .enumerate()
        .for_each(|(r, row)| row_kernel(r, row, a, b, dims));
}

/// Row-parallel batched product on the rayon global pool.
///
/// # Panics
/// Panics if a slice is shorter than `dims` implies.
pub fn matmul_parallel<T: TensorFloat>(a: &[T], b: &[T], out: &mut [T], dims: MatmulDims) {
    if dims.n == 0 {
        return;
    }
    out.par_chunks_mut(dims.n)
        .enumerate()
        .for_each(|(r, row)| row_kernel(r, row, a, b, dims));
}
