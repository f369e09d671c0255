use super::{Optimizer, ensure_same_shape};
use crate::error::{Result, TensorError};
use crate::float::TensorFloat;
use crate::nn::param::ParamId;
use crate::tensors::Tensor;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

pub(super) const BETA1: f64 = 0.9;
pub(super) const BETA2: f64 = 0.999;
pub(super) const EPSILON: f64 = 1e-8;

#[derive(Debug, Clone)]
struct Moments<T> {
    m: Tensor<T, 2>,
    v: Tensor<T, 2>,
}

/// Adam with bias-corrected moment estimates.
///
/// Each parameter gets its own `(m, v)` pair, created on its first update
/// and keyed by [`ParamId`]. The step counter `t` is shared and advanced by
/// [`Optimizer::step`]; updates issued before the first step use `t = 1`.
#[derive(Debug, Clone)]
pub struct Adam<T> {
    lr: T,
    beta1: T,
    beta2: T,
    epsilon: T,
    t: u32,
    moments: HashMap<ParamId, Moments<T>>,
}

impl<T: TensorFloat> Adam<T> {
    /// Adam with `beta1 = 0.9`, `beta2 = 0.999`, `epsilon = 1e-8`.
    #[must_use]
    pub fn new(learning_rate: T) -> Self {
        Self::with_hyperparameters(
            learning_rate,
            T::from_f64(BETA1),
            T::from_f64(BETA2),
            T::from_f64(EPSILON),
        )
    }

    /// Adam with explicit decay rates and epsilon.
    #[must_use]
    pub fn with_hyperparameters(learning_rate: T, beta1: T, beta2: T, epsilon: T) -> Self {
        Self {
            lr: learning_rate,
            beta1,
            beta2,
            epsilon,
            t: 0,
            moments: HashMap::new(),
        }
    }

    /// Number of completed `step` calls.
    #[must_use]
    pub const fn timestep(&self) -> u32 {
        self.t
    }

    /// First moment estimate of a parameter, if it has been updated.
    #[must_use]
    pub fn first_moment(&self, id: ParamId) -> Option<&Tensor<T, 2>> {
        self.moments.get(&id).map(|s| &s.m)
    }

    /// Second moment estimate of a parameter, if it has been updated.
    #[must_use]
    pub fn second_moment(&self, id: ParamId) -> Option<&Tensor<T, 2>> {
        self.moments.get(&id).map(|s| &s.v)
    }
}

impl<T: TensorFloat> Optimizer<T> for Adam<T> {
    fn step(&mut self) {
        self.t = self.t.saturating_add(1);
    }

    fn update(&mut self, id: ParamId, param: &mut Tensor<T, 2>, grad: &Tensor<T, 2>) -> Result<()> {
        ensure_same_shape(param, grad)?;

        let shape = *param.shape();
        let state = match self.moments.entry(id) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(Moments {
                m: Tensor::zeros(shape)?,
                v: Tensor::zeros(shape)?,
            }),
        };
        if state.m.shape() != &shape {
            return Err(TensorError::DimensionMismatch {
                op: "adam",
                left: state.m.shape().to_vec(),
                right: shape.to_vec(),
            }
            .into());
        }

        let t = i32::try_from(self.t.max(1)).unwrap_or(i32::MAX);
        let (b1, b2) = (self.beta1, self.beta2);
        let m_correction = T::ONE - b1.powi(t);
        let v_correction = T::ONE - b2.powi(t);

        let weights = param.iter_mut().zip(grad);
        let moments = state.m.iter_mut().zip(state.v.iter_mut());
        #[allow(clippy::suspicious_operation_groupings)]
        for ((w, &g), (m, v)) in weights.zip(moments) {
            *m = b1 * *m + (T::ONE - b1) * g;
            *v = b2 * *v + (T::ONE - b2) * g * g;
            let m_hat = *m / m_correction;
            let v_hat = *v / v_correction;
            *w -= self.lr * m_hat / (v_hat.sqrt() + self.epsilon);
        }
        Ok(())
    }

    fn learning_rate(&self) -> T {
        self.lr
    }
}
