//! Recommendation orchestration.
//!
//! [`Recommender`] picks a ranking strategy per request:
//!
//! - **Hybrid**: the user has rating history; rank with [`HybridRanker`](crate::scoring::HybridRanker).
//! - **Content-only**: no history; rank with the content scorer and report a
//!   collaborative score of `0`.
//! - **Fallback**: hybrid was attempted but the collaborative predictor failed;
//!   the request is retried once content-only and never fails outright.
//!
//! It also owns the shared user directory and rating index, and writes new
//! users and ratings through to storage.

pub mod error;
pub mod recommender;
pub mod types;


pub use error::{RecommendError, RecommendResult};
pub use recommender::{Recommender, RecommenderSettings, Stores};
pub use types::{RecommendationMode, RecommendationSet, RecommenderStats};
