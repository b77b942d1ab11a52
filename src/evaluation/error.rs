use thiserror::Error;

use crate::collaborative::CollaborativeError;

/// Errors returned by the offline metrics.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("length mismatch: {actual} actual ratings vs {predicted} predictions")]
    LengthMismatch { actual: usize, predicted: usize },

    #[error("no ratings to evaluate")]
    Empty,

    #[error("k must be greater than zero")]
    InvalidK,

    #[error("prediction failed: {0}")]
    Predictor(#[from] CollaborativeError),
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;
