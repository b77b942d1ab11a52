use serde::Serialize;

use crate::catalog::ModuleId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A module with a single ranking score.
pub struct ModuleScore {
    pub module_id: ModuleId,
    pub score: f32,
}

impl ModuleScore {
    pub fn new(module_id: ModuleId, score: f32) -> Self {
        Self { module_id, score }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A ranked module with both component scores, so callers can see why it ranked where it did.
pub struct ScoredCandidate {
    pub module_id: ModuleId,
    pub hybrid_score: f32,
    /// `0.0` when the item was ranked without the collaborative signal.
    pub collaborative_score: f32,
    pub content_score: f32,
}

impl ScoredCandidate {
    pub fn new(
        module_id: ModuleId,
        hybrid_score: f32,
        collaborative_score: f32,
        content_score: f32,
    ) -> Self {
        Self {
            module_id,
            hybrid_score,
            collaborative_score,
            content_score,
        }
    }

    pub fn to_module_score(&self) -> ModuleScore {
        ModuleScore::new(self.module_id, self.hybrid_score)
    }
}

/// Sorts descending by `key` and keeps the first `top_n`. Ties keep input order.
pub(crate) fn rank_descending<T>(items: &mut Vec<T>, top_n: usize, key: impl Fn(&T) -> f32) {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
    items.truncate(top_n);
}
