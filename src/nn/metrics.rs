//! Classification metrics over `samples × outputs` tensors.

use crate::error::TensorError;
use crate::float::TensorFloat;
use crate::tensors::Tensor;

fn ensure_same_shape<T>(prediction: &Tensor<T, 2>, target: &Tensor<T, 2>) -> Result<(), TensorError> {
    if prediction.shape() == target.shape() {
        Ok(())
    } else {
        Err(TensorError::ShapeMismatch {
            left: prediction.shape().to_vec(),
            right: target.shape().to_vec(),
        })
    }
}

fn fraction<T: TensorFloat>(correct: usize, rows: usize) -> T {
    if rows == 0 {
        T::ZERO
    } else {
        T::from_usize(correct) / T::from_usize(rows)
    }
}

fn rows_of<T>(t: &Tensor<T, 2>) -> core::slice::Chunks<'_, T> {
    // zero-width rows never count as correct; `max(1)` keeps `chunks` valid
    t.data().chunks(t.shape()[1].max(1))
}

/// Fraction of rows whose every output lands on the same side of
/// `threshold` as the target.
///
/// # Errors
/// `ShapeMismatch` if the shapes differ.
pub fn binary_accuracy<T: TensorFloat>(
    prediction: &Tensor<T, 2>,
    target: &Tensor<T, 2>,
    threshold: T,
) -> Result<T, TensorError> {
    ensure_same_shape(prediction, target)?;
    if prediction.shape()[1] == 0 {
        return Ok(T::ZERO);
    }
    let correct = rows_of(prediction)
        .zip(rows_of(target))
        .filter(|(p, t)| {
            p.iter()
                .zip(t.iter())
                .all(|(&p, &t)| (p > threshold) == (t > threshold))
        })
        .count();
    Ok(fraction(correct, prediction.shape()[0]))
}

/// Index of the largest entry; ties go to the first.
fn argmax<T: TensorFloat>(row: &[T]) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, &x) in row.iter().enumerate() {
        match best {
            Some((_, b)) if x <= b => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

/// Fraction of rows whose arg-max matches the target's arg-max.
///
/// # Errors
/// `ShapeMismatch` if the shapes differ.
pub fn categorical_accuracy<T: TensorFloat>(
    prediction: &Tensor<T, 2>,
    target: &Tensor<T, 2>,
) -> Result<T, TensorError> {
    ensure_same_shape(prediction, target)?;
    if prediction.shape()[1] == 0 {
        return Ok(T::ZERO);
    }
    let correct = rows_of(prediction)
        .zip(rows_of(target))
        .filter(|(p, t)| argmax(p) == argmax(t))
        .count();
    Ok(fraction(correct, prediction.shape()[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor;

    #[test]
    fn binary() {
        let p: Tensor<f64, 2> = tensor!([[0.9], [0.2], [0.6], [0.4]]);
        let t: Tensor<f64, 2> = tensor!([[1.0], [0.0], [0.0], [0.0]]);
        assert_eq!(binary_accuracy(&p, &t, 0.5).unwrap(), 0.75);
    }

    #[test]
    fn categorical() {
        let p: Tensor<f64, 2> = tensor!([[0.1, 0.7, 0.2], [0.5, 0.3, 0.2]]);
        let t: Tensor<f64, 2> = tensor!([[0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(categorical_accuracy(&p, &t).unwrap(), 0.5);
    }

    #[test]
    fn shape_mismatch() {
        let p: Tensor<f64, 2> = tensor!([[0.1, 0.9]]);
        let t: Tensor<f64, 2> = tensor!([[1.0]]);
        assert!(binary_accuracy(&p, &t, 0.5).is_err());
        assert!(categorical_accuracy(&p, &t).is_err());
    }

    #[test]
    fn ties_pick_first_index() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), Some(1));
        assert_eq!(argmax::<f32>(&[]), None);
    }
}
