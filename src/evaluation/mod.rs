//! Offline evaluation of collaborative predictors against held-out ratings.

pub mod error;
pub mod metrics;
pub mod ranking;

#[cfg(test)]
mod tests;

pub use error::{EvaluationError, EvaluationResult};
pub use metrics::{mae, median, r_squared, rmse};
pub use ranking::precision_at_k;

use crate::catalog::Rating;
use crate::collaborative::CollaborativePredictor;

/// K used for the ranking metric when none is given.
pub const DEFAULT_PRECISION_K: usize = 5;

#[derive(Debug, Clone, PartialEq)]
/// Accuracy summary for one predictor.
pub struct ModelMetrics {
    pub model_name: String,
    pub mae: f64,
    pub rmse: f64,
    pub r_squared: f64,
    /// `(k, precision)`; `None` when the ranking metric was not computed.
    pub precision_at_k: Option<(usize, f64)>,
}

impl std::fmt::Display for ModelMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<25} | MAE: {:.4} | RMSE: {:.4} | R²: {:.4} | ",
            self.model_name, self.mae, self.rmse, self.r_squared
        )?;
        match self.precision_at_k {
            Some((k, p)) => write!(f, "P@{k}: {p:.4}"),
            None => write!(f, "P@K: N/A"),
        }
    }
}

/// Scores `predictor` on every rating in `test`.
///
/// Pass `precision_k` to also compute [`precision_at_k`] with the median
/// relevance threshold. Any prediction failure aborts the evaluation.
pub fn evaluate_predictor(
    predictor: &dyn CollaborativePredictor,
    test: &[Rating],
    precision_k: Option<usize>,
) -> EvaluationResult<ModelMetrics> {
    let actual: Vec<f32> = test.iter().map(|r| r.rating).collect();
    let predicted = test
        .iter()
        .map(|r| predictor.predict(r.user_id, r.module_id))
        .collect::<Result<Vec<f32>, _>>()?;

    let precision_at_k = match precision_k {
        Some(k) => Some((k, precision_at_k(predictor, test, k, None)?)),
        None => None,
    };

    let metrics = ModelMetrics {
        model_name: predictor.name().to_string(),
        mae: mae(&actual, &predicted)?,
        rmse: rmse(&actual, &predicted)?,
        r_squared: r_squared(&actual, &predicted)?,
        precision_at_k,
    };

    tracing::debug!(model = %metrics.model_name, ratings = test.len(), "Evaluated predictor");

    Ok(metrics)
}
