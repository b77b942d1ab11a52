use serde::Serialize;

use crate::catalog::UserId;
use crate::scoring::ScoredCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Which strategy produced a [`RecommendationSet`].
pub enum RecommendationMode {
    /// Collaborative and content scores blended.
    Hybrid,
    /// Caller asked for content-only ranking (no rating history).
    ContentOnly,
    /// Hybrid ranking failed and was replaced by content-only ranking.
    Fallback,
}

impl RecommendationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMode::Hybrid => "hybrid",
            RecommendationMode::ContentOnly => "content_only",
            RecommendationMode::Fallback => "fallback",
        }
    }

    /// Returns `true` if the collaborative signal was not used.
    pub fn is_content_only(&self) -> bool {
        !matches!(self, RecommendationMode::Hybrid)
    }
}

impl std::fmt::Display for RecommendationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Ranked recommendations for one user, best first.
pub struct RecommendationSet {
    pub user_id: UserId,
    pub mode: RecommendationMode,
    pub items: Vec<ScoredCandidate>,
}

impl RecommendationSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn module_ids(&self) -> Vec<u32> {
        self.items.iter().map(|i| i.module_id).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Sizes of the in-memory state, for health reporting.
pub struct RecommenderStats {
    pub users: usize,
    pub modules: usize,
    pub ratings: usize,
    pub rated_users: usize,
}
