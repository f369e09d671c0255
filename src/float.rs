//! Element types a tensor can hold.

use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Floating-point element of a [`Tensor`](crate::tensors::Tensor).
///
/// Implemented for `f32` and `f64`. Conversions go through `f64` so that
/// constants (clamping bounds, Adam hyperparameters, initializer scales) can
/// be written once.
pub trait TensorFloat:
    Copy
    + Default
    + PartialOrd
    + Debug
    + Display
    + Send
    + Sync
    + Sum
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + 'static
{
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;

    /// Convert from `f64`, rounding if needed.
    fn from_f64(x: f64) -> Self;
    /// Convert to `f64`.
    fn into_f64(self) -> f64;

    /// Convert a count (sample or element count).
    fn from_usize(n: usize) -> Self;

    /// `e^self`.
    fn exp(self) -> Self;
    /// Natural logarithm.
    fn ln(self) -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Integer power.
    fn powi(self, n: i32) -> Self;

    /// Larger of two values.
    #[must_use]
    fn max_of(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    /// Clamp into `[lo, hi]`.
    #[must_use]
    fn clamp_to(self, lo: Self, hi: Self) -> Self {
        if self < lo {
            lo
        } else if self > hi {
            hi
        } else {
            self
        }
    }
}

macro_rules! impl_tensor_float {
    ($($ty:ident),*) => {
        $(
            impl TensorFloat for $ty {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                #[allow(clippy::cast_possible_truncation)]
                fn from_f64(x: f64) -> Self {
                    x as Self
                }

                fn into_f64(self) -> f64 {
                    f64::from(self)
                }

                #[allow(clippy::cast_precision_loss)]
                fn from_usize(n: usize) -> Self {
                    n as Self
                }

                fn exp(self) -> Self {
                    $ty::exp(self)
                }

                fn ln(self) -> Self {
                    $ty::ln(self)
                }

                fn sqrt(self) -> Self {
                    $ty::sqrt(self)
                }

                fn powi(self, n: i32) -> Self {
                    $ty::powi(self, n)
                }
            }
        )*
    };
}

impl_tensor_float!(f32, f64);
