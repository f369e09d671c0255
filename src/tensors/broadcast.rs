//! Broadcasting elementwise arithmetic and scalar operators.
//!
//! Two equal-rank shapes are compatible when, on every axis, the extents are
//! equal or one of them is 1. The result takes the non-unit extent per axis,
//! so an empty axis stays empty.
//! For each output position the source element of an operand is found by
//! pinning every axis where that operand has extent 1 to index 0.

use super::{Tensor, checked_size};
use crate::error::TensorError;
use crate::float::TensorFloat;
use core::ops::{Add, AddAssign, Div, Mul, Sub};

/// Broadcast result shape of `a` and `b`.
///
/// # Errors
/// `BroadcastMismatch` if some axis has two different extents, neither 1.
pub fn broadcast_shape<const R: usize>(
    a: &[usize; R],
    b: &[usize; R],
) -> Result<[usize; R], TensorError> {
    let mut out = [0; R];
    for axis in 0..R {
        let (x, y) = (a[axis], b[axis]);
        if x != y && x != 1 && y != 1 {
            return Err(TensorError::BroadcastMismatch {
                left: a.to_vec(),
                right: b.to_vec(),
            });
        }
        out[axis] = if x == 1 { y } else { x };
    }
    Ok(out)
}

/// Row-major strides of `shape` with every extent-1 axis given stride 0.
fn collapsed_strides<const R: usize>(shape: &[usize; R]) -> [usize; R] {
    let mut strides = [0; R];
    let mut stride = 1;
    for axis in (0..R).rev() {
        strides[axis] = if shape[axis] == 1 { 0 } else { stride };
        stride *= shape[axis];
    }
    strides
}

/// Offset in an operand with `strides` of the output element at `linear`.
fn source_offset<const R: usize>(mut linear: usize, out: &[usize; R], strides: &[usize; R]) -> usize {
    let mut offset = 0;
    for axis in (0..R).rev() {
        let idx = linear % out[axis];
        linear /= out[axis];
        offset += idx * strides[axis];
    }
    offset
}

impl<T: TensorFloat, const R: usize> Tensor<T, R> {
    /// Combines `self` and `other` elementwise under broadcasting.
    ///
    /// Neither operand is modified, whether or not the call succeeds.
    ///
    /// # Errors
    /// `BroadcastMismatch` if the shapes are incompatible.
    pub fn broadcast_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> Result<Self, TensorError> {
        let shape = broadcast_shape(&self.shape, &other.shape)?;

        // fast path, no index arithmetic
        if self.shape == other.shape {
            let data = self.data.iter().zip(&other.data).map(|(&x, &y)| f(x, y)).collect();
            return Ok(Self { shape, data });
        }

        let len = checked_size(&shape)?;
        let lhs = collapsed_strides(&self.shape);
        let rhs = collapsed_strides(&other.shape);
        let data = (0..len)
            .map(|i| {
                let x = self.data[source_offset(i, &shape, &lhs)];
                let y = other.data[source_offset(i, &shape, &rhs)];
                f(x, y)
            })
            .collect();
        Ok(Self { shape, data })
    }

    /// Broadcasting `self + other`.
    ///
    /// # Errors
    /// `BroadcastMismatch` if the shapes are incompatible.
    pub fn broadcast_add(&self, other: &Self) -> Result<Self, TensorError> {
        self.broadcast_with(other, |x, y| x + y)
    }

    /// Broadcasting `self - other`.
    ///
    /// # Errors
    /// `BroadcastMismatch` if the shapes are incompatible.
    pub fn broadcast_sub(&self, other: &Self) -> Result<Self, TensorError> {
        self.broadcast_with(other, |x, y| x - y)
    }

    /// Broadcasting `self * other` (Hadamard product).
    ///
    /// # Errors
    /// `BroadcastMismatch` if the shapes are incompatible.
    pub fn broadcast_mul(&self, other: &Self) -> Result<Self, TensorError> {
        self.broadcast_with(other, |x, y| x * y)
    }
}

macro_rules! scalar_op {
    ($tr:ident, $method:ident, $op:tt) => {
        impl<T: TensorFloat, const R: usize> $tr<T> for Tensor<T, R> {
            type Output = Self;

            fn $method(mut self, scalar: T) -> Self {
                for x in &mut self.data {
                    *x = *x $op scalar;
                }
                self
            }
        }

        impl<T: TensorFloat, const R: usize> $tr<T> for &Tensor<T, R> {
            type Output = Tensor<T, R>;

            fn $method(self, scalar: T) -> Tensor<T, R> {
                self.map(|&x| x $op scalar)
            }
        }
    };
}

scalar_op!(Add, add, +);
scalar_op!(Sub, sub, -);
scalar_op!(Mul, mul, *);
scalar_op!(Div, div, /);

impl<T: TensorFloat, const R: usize> AddAssign<T> for Tensor<T, R> {
    fn add_assign(&mut self, scalar: T) {
        for x in &mut self.data {
            *x += scalar;
        }
    }
}

// scalar on the left, commutative ops only
macro_rules! scalar_lhs {
    ($($ty:ident),*) => {
        $(
            impl<const R: usize> Add<Tensor<$ty, R>> for $ty {
                type Output = Tensor<$ty, R>;

                fn add(self, tensor: Tensor<$ty, R>) -> Tensor<$ty, R> {
                    tensor + self
                }
            }

            impl<const R: usize> Mul<Tensor<$ty, R>> for $ty {
                type Output = Tensor<$ty, R>;

                fn mul(self, tensor: Tensor<$ty, R>) -> Tensor<$ty, R> {
                    tensor * self
                }
            }

            impl<const R: usize> Add<&Tensor<$ty, R>> for $ty {
                type Output = Tensor<$ty, R>;

                fn add(self, tensor: &Tensor<$ty, R>) -> Tensor<$ty, R> {
                    tensor + self
                }
            }

            impl<const R: usize> Mul<&Tensor<$ty, R>> for $ty {
                type Output = Tensor<$ty, R>;

                fn mul(self, tensor: &Tensor<$ty, R>) -> Tensor<$ty, R> {
                    tensor * self
                }
            }
        )*
    };
}

scalar_lhs!(f32, f64);
