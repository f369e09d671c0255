//! Weight initializers.
//!
//! An initializer is any `FnMut(&mut Tensor<T, 2>)` that fills every element
//! of a freshly allocated parameter. The builders here borrow an explicit
//! random generator, so a seeded [`StdRng`](rand::rngs::StdRng) makes
//! initialization reproducible.
//!
//! # Example
//!
//! ```rust
//! use rand::{SeedableRng, rngs::StdRng};
//! use tensorflux::nn::{init, layers::Dense};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let layer = Dense::<f64>::with_init(2, 4, init::normal(&mut rng, 0.0, 0.1).unwrap(), init::zeros())
//!     .unwrap();
//! assert_eq!(layer.weight().shape(), &[2, 4]);
//! ```

use crate::error::{Error, Result};
use crate::float::TensorFloat;
use crate::tensors::Tensor;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Sets every element to zero.
pub fn zeros<T: TensorFloat>() -> impl FnMut(&mut Tensor<T, 2>) {
    |t: &mut Tensor<T, 2>| t.fill(T::ZERO)
}

/// Sets every element to `value`.
pub fn constant<T: TensorFloat>(value: T) -> impl FnMut(&mut Tensor<T, 2>) {
    move |t: &mut Tensor<T, 2>| t.fill(value)
}

/// I.i.d. normal samples with the given mean and standard deviation.
///
/// # Errors
/// [`Error::Initializer`] if `std` is negative or either argument is not finite.
pub fn normal<T, G>(rng: &mut G, mean: f64, std: f64) -> Result<impl FnMut(&mut Tensor<T, 2>)>
where
    T: TensorFloat,
    G: Rng,
{
    if !mean.is_finite() || !std.is_finite() || std < 0.0 {
        return Err(Error::Initializer(format!(
            "normal(mean={mean}, std={std}) is not a valid distribution"
        )));
    }
    Ok(move |t: &mut Tensor<T, 2>| {
        for x in t.iter_mut() {
            let z: f64 = StandardNormal.sample(&mut *rng);
            *x = T::from_f64(mean + std * z);
        }
    })
}

/// I.i.d. uniform samples in `[low, high)`.
///
/// # Errors
/// [`Error::Initializer`] unless `low < high` and both are finite.
pub fn uniform<T, G>(rng: &mut G, low: f64, high: f64) -> Result<impl FnMut(&mut Tensor<T, 2>)>
where
    T: TensorFloat,
    G: Rng,
{
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(Error::Initializer(format!(
            "uniform({low}, {high}) is an empty range"
        )));
    }
    Ok(move |t: &mut Tensor<T, 2>| {
        for x in t.iter_mut() {
            let u: f64 = rng.random();
            *x = T::from_f64(low + (high - low) * u);
        }
    })
}

/// Zero-mean normal with standard deviation `sqrt(2 / (fan_in + fan_out))`.
///
/// The fans are read from the tensor being filled (rows, columns), which is
/// the default policy of [`Dense`](super::layers::Dense).
pub fn xavier_normal<T, G>(rng: &mut G) -> impl FnMut(&mut Tensor<T, 2>)
where
    T: TensorFloat,
    G: Rng,
{
    move |t: &mut Tensor<T, 2>| {
        let fans = t.rows() + t.cols();
        if fans == 0 {
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        let scale = (2.0 / fans as f64).sqrt();
        for x in t.iter_mut() {
            let z: f64 = StandardNormal.sample(&mut *rng);
            *x = T::from_f64(scale * z);
        }
    }
}
