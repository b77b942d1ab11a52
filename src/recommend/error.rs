use thiserror::Error;

use crate::catalog::{ModuleId, UserId};
use crate::collaborative::CollaborativeError;
use crate::config::ConfigError;
use crate::evaluation::EvaluationError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("user {user_id} not found")]
    UserNotFound { user_id: UserId },

    #[error("module {module_id} not found")]
    ModuleNotFound { module_id: ModuleId },

    #[error("rating {value} is outside 1.0..=5.0")]
    InvalidRating { value: f32 },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("predictor error: {0}")]
    Predictor(#[from] CollaborativeError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

pub type RecommendResult<T> = Result<T, RecommendError>;
