use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{ModuleId, User, UserId};
use crate::collaborative::{CollaborativeError, CollaborativePredictor, CollaborativeResult};
use crate::constants::{DEFAULT_COLLABORATIVE_WEIGHT, clamp_rating};

use super::content::ContentScorer;
use super::types::{ModuleScore, ScoredCandidate, rank_descending};

/// Weighted blend of a collaborative predictor and the content scorer.
///
/// Prediction failures are returned to the caller untouched; deciding what to
/// do about them is the recommender's job.
pub struct HybridRanker {
    predictor: Arc<dyn CollaborativePredictor>,
    content: Arc<ContentScorer>,
    collaborative_weight: f32,
    content_weight: f32,
}

impl std::fmt::Debug for HybridRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridRanker")
            .field("predictor", &self.predictor.name())
            .field("collaborative_weight", &self.collaborative_weight)
            .field("content_weight", &self.content_weight)
            .finish()
    }
}

impl HybridRanker {
    /// Creates a ranker. `collaborative_weight` is clamped to `[0, 1]`; a NaN
    /// weight falls back to the default.
    pub fn new(
        predictor: Arc<dyn CollaborativePredictor>,
        content: Arc<ContentScorer>,
        collaborative_weight: f32,
    ) -> Self {
        let collaborative_weight = if collaborative_weight.is_nan() {
            DEFAULT_COLLABORATIVE_WEIGHT
        } else {
            collaborative_weight.clamp(0.0, 1.0)
        };

        Self {
            predictor,
            content,
            collaborative_weight,
            content_weight: 1.0 - collaborative_weight,
        }
    }

    /// Creates a ranker with the default 0.7 / 0.3 split.
    pub fn with_default_weights(
        predictor: Arc<dyn CollaborativePredictor>,
        content: Arc<ContentScorer>,
    ) -> Self {
        Self::new(predictor, content, DEFAULT_COLLABORATIVE_WEIGHT)
    }

    pub fn collaborative_weight(&self) -> f32 {
        self.collaborative_weight
    }

    pub fn content_weight(&self) -> f32 {
        self.content_weight
    }

    pub fn content(&self) -> &Arc<ContentScorer> {
        &self.content
    }

    pub fn predictor(&self) -> &dyn CollaborativePredictor {
        self.predictor.as_ref()
    }

    pub fn predictor_name(&self) -> &'static str {
        self.predictor.name()
    }

    /// Hybrid score for one pair, on the rating scale.
    pub fn predict(&self, user_id: UserId, module_id: ModuleId) -> CollaborativeResult<f32> {
        let user = self.content.users().get(user_id);
        Ok(self
            .score_candidate(user_id, user.as_ref(), module_id)?
            .hybrid_score)
    }

    fn blend(&self, collaborative: f32, content: f32) -> f32 {
        clamp_rating(self.collaborative_weight * collaborative + self.content_weight * content)
    }

    fn score_candidate(
        &self,
        user_id: UserId,
        user: Option<&User>,
        module_id: ModuleId,
    ) -> CollaborativeResult<ScoredCandidate> {
        let predicted = self.predictor.predict(user_id, module_id)?;
        if !predicted.is_finite() {
            return Err(CollaborativeError::NonFinite { user_id, module_id });
        }
        let collaborative = clamp_rating(predicted);
        let content = self.content.score_for(user, module_id);

        Ok(ScoredCandidate::new(
            module_id,
            self.blend(collaborative, content),
            collaborative,
            content,
        ))
    }

    fn score_all<'a>(
        &self,
        user_id: UserId,
        candidates: impl Iterator<Item = &'a ModuleId>,
    ) -> CollaborativeResult<Vec<ScoredCandidate>> {
        let user = self.content.users().get(user_id);

        candidates
            .map(|&module_id| self.score_candidate(user_id, user.as_ref(), module_id))
            .collect()
    }

    /// Top `top_n` candidates by hybrid score, skipping anything in `exclude`.
    pub fn rank(
        &self,
        user_id: UserId,
        candidates: &[ModuleId],
        top_n: usize,
        exclude: Option<&HashSet<ModuleId>>,
    ) -> CollaborativeResult<Vec<ModuleScore>> {
        let kept = candidates
            .iter()
            .filter(|id| exclude.is_none_or(|set| !set.contains(*id)));

        let mut scored: Vec<ModuleScore> = self
            .score_all(user_id, kept)?
            .iter()
            .map(ScoredCandidate::to_module_score)
            .collect();

        rank_descending(&mut scored, top_n, |s| s.score);

        debug!(
            user_id,
            candidates = candidates.len(),
            returned = scored.len(),
            "Hybrid ranking complete"
        );

        Ok(scored)
    }

    /// Like [`rank`](Self::rank) but keeps both component scores.
    pub fn rank_detailed(
        &self,
        user_id: UserId,
        candidates: &[ModuleId],
        top_n: usize,
    ) -> CollaborativeResult<Vec<ScoredCandidate>> {
        let mut scored = self.score_all(user_id, candidates.iter())?;

        rank_descending(&mut scored, top_n, |s| s.hybrid_score);

        debug!(
            user_id,
            candidates = candidates.len(),
            returned = scored.len(),
            top_score = scored.first().map(|s| s.hybrid_score),
            "Detailed hybrid ranking complete"
        );

        Ok(scored)
    }
}
