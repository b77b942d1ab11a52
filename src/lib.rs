//! Shieldrec library crate (used by the CLI and integration tests).
//!
//! Recommends anti-scam training modules to learners by blending a
//! collaborative-filtering prediction with a content score derived from the
//! learner's profile and the module's attributes.
//!
//! # Public API Surface
//!
//! ## Orchestration
//! - [`Recommender`], [`RecommenderSettings`], [`Stores`] - Strategy selection and write-through
//! - [`RecommendationSet`], [`RecommendationMode`] - What a request returns
//!
//! ## Scoring
//! - [`ContentScorer`] - Attribute-based `(user, module)` rating
//! - [`HybridRanker`] - Weighted blend with a collaborative predictor
//! - [`CollaborativePredictor`], [`FactorModel`], [`PopularityBaseline`] - Collaborative signal
//!
//! ## Data
//! - [`User`], [`Module`], [`Rating`], [`NewUser`] - Domain records
//! - [`CsvStore`], [`MemoryStore`] - Storage backends
//!
//! ## Evaluation
//! - [`evaluation::evaluate_predictor`], [`ModelMetrics`] - Offline accuracy metrics
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod catalog;
pub mod collaborative;
pub mod config;
pub mod constants;
pub mod evaluation;
pub mod recommend;
pub mod scoring;
pub mod storage;

pub use cache::{RatingIndex, UserDirectory};
pub use catalog::{Module, ModuleId, NewUser, Rating, RiskProfile, User, UserId};
#[cfg(any(test, feature = "mock"))]
pub use collaborative::MockPredictor;
pub use collaborative::{
    CollaborativeError, CollaborativePredictor, CollaborativeResult, FactorModel, FactorRow,
    PopularityBaseline,
};
pub use config::{Config, ConfigError, PredictorKind};
pub use evaluation::{EvaluationError, ModelMetrics};
pub use recommend::{
    RecommendError, RecommendResult, RecommendationMode, RecommendationSet, Recommender,
    RecommenderSettings, RecommenderStats, Stores,
};
pub use scoring::{ContentBreakdown, ContentScorer, HybridRanker, ModuleScore, ScoredCandidate};
pub use storage::{CsvStore, MemoryStore, ModuleStore, RatingStore, StorageError, UserStore};
