//! Content-based scoring and hybrid ranking.
//!
//! [`ContentScorer`] rates a `(user, module)` pair from static attributes
//! alone, so it works for users with no history. [`HybridRanker`] blends that
//! score with a [`CollaborativePredictor`](crate::collaborative::CollaborativePredictor)
//! prediction:
//!
//! ```text
//! hybrid = w * collaborative + (1 - w) * content      (w defaults to 0.7)
//! ```
//!
//! Every score is clamped onto the 1-5 rating scale. Rankings sort descending
//! with a stable sort, so equal scores keep catalog (candidate) order.

pub mod content;
pub mod hybrid;
pub mod types;


pub use content::{
    ContentBreakdown, ContentScorer, difficulty_fit, duration_preference, literacy_match,
    topic_match,
};
pub use hybrid::HybridRanker;
pub use types::{ModuleScore, ScoredCandidate};
