//! Pointwise error metrics over paired actual/predicted ratings.

use super::error::{EvaluationError, EvaluationResult};

fn paired(actual: &[f32], predicted: &[f32]) -> EvaluationResult<()> {
    if actual.len() != predicted.len() {
        return Err(EvaluationError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(EvaluationError::Empty);
    }
    Ok(())
}

fn squared_errors<'a>(actual: &'a [f32], predicted: &'a [f32]) -> impl Iterator<Item = f64> + 'a {
    actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| (f64::from(a) - f64::from(p)).powi(2))
}

/// Mean absolute error.
pub fn mae(actual: &[f32], predicted: &[f32]) -> EvaluationResult<f64> {
    paired(actual, predicted)?;
    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| (f64::from(a) - f64::from(p)).abs())
        .sum();
    Ok(total / actual.len() as f64)
}

/// Root mean squared error.
pub fn rmse(actual: &[f32], predicted: &[f32]) -> EvaluationResult<f64> {
    paired(actual, predicted)?;
    let mse = squared_errors(actual, predicted).sum::<f64>() / actual.len() as f64;
    Ok(mse.sqrt())
}

/// Coefficient of determination. Returns `0` when the actual ratings have no variance.
pub fn r_squared(actual: &[f32], predicted: &[f32]) -> EvaluationResult<f64> {
    paired(actual, predicted)?;

    let mean = actual.iter().map(|&a| f64::from(a)).sum::<f64>() / actual.len() as f64;
    let ss_total: f64 = actual.iter().map(|&a| (f64::from(a) - mean).powi(2)).sum();
    if ss_total == 0.0 {
        return Ok(0.0);
    }

    let ss_residual: f64 = squared_errors(actual, predicted).sum();
    Ok(1.0 - ss_residual / ss_total)
}

/// Median of `values`; the mean of the two middle values for even lengths.
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
