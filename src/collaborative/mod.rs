//! Collaborative-filtering predictors.
//!
//! The ranker treats the collaborative model as an opaque
//! `(user, module) -> score` function. A failed prediction is returned as a
//! [`CollaborativeError`] rather than a panic, and the recommender treats it as
//! a cold-start signal.
//!
//! - [`FactorModel`]: trained matrix-factorization artifact loaded from disk.
//! - [`PopularityBaseline`]: per-module mean rating with a global fallback.

pub mod error;
pub mod factor;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod popularity;


pub use error::{CollaborativeError, CollaborativeResult};
pub use factor::{FactorModel, FactorRow};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockPredictor;
pub use popularity::PopularityBaseline;

use crate::catalog::{ModuleId, UserId};

/// A trained `(user, module) -> rating` predictor.
pub trait CollaborativePredictor: Send + Sync {
    /// Predicts the rating `user_id` would give `module_id`.
    ///
    /// Implementations may fail for ids they never saw during training.
    fn predict(&self, user_id: UserId, module_id: ModuleId) -> CollaborativeResult<f32>;

    /// Short human-readable model name, used in logs and reports.
    fn name(&self) -> &'static str;
}
