use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::{ModuleId, UserId};

#[derive(Debug, Error)]
pub enum CollaborativeError {
    #[error("user {user_id} was not seen during training")]
    UnknownUser { user_id: UserId },

    #[error("module {module_id} was not seen during training")]
    UnknownModule { module_id: ModuleId },

    #[error("non-finite prediction for user {user_id}, module {module_id}")]
    NonFinite {
        user_id: UserId,
        module_id: ModuleId,
    },

    #[error("failed to read model artifact {path}: {source}")]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {reason}")]
    MalformedArtifact { reason: String },

    #[error("cannot fit a predictor on an empty rating log")]
    EmptyTrainingSet,

    #[error("non-finite rating in training log for user {user_id}, module {module_id}")]
    NonFiniteRating {
        user_id: UserId,
        module_id: ModuleId,
    },
}

impl CollaborativeError {
    /// Returns `true` for per-request failures the recommender should degrade on
    /// (as opposed to load-time failures).
    pub fn is_prediction_failure(&self) -> bool {
        matches!(
            self,
            CollaborativeError::UnknownUser { .. }
                | CollaborativeError::UnknownModule { .. }
                | CollaborativeError::NonFinite { .. }
        )
    }
}

pub type CollaborativeResult<T> = Result<T, CollaborativeError>;
