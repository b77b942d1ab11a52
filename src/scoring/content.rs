//! Rule-based content scoring.
//!
//! Four sub-scores in `[0, 1]` are combined with fixed weights and mapped onto
//! the rating scale as `1 + 4 * raw`:
//!
//! | sub-score  | weight | rule                                                        |
//! |------------|--------|-------------------------------------------------------------|
//! | topic      | 0.4    | preferred topic equals scam type (case-insensitive)         |
//! | literacy   | 0.3    | `max(0, 1 - abs(literacy - target) / 5)`                    |
//! | difficulty | 0.2    | too easy: `1 - gap/5 * 0.3`; too hard: `max(0, 1 - gap/5 * 1.5)` |
//! | duration   | 0.1    | `1.0` up to 7 minutes, else `0.7`                           |

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::UserDirectory;
use crate::catalog::{Module, ModuleId, User, UserId};
use crate::constants::{
    DIFFICULTY_WEIGHT, DURATION_WEIGHT, LEVEL_GAP_SCALE, LITERACY_WEIGHT, LONG_MODULE_SCORE,
    MIN_RATING, NEUTRAL_CONTENT_SCORE, RATING_SPAN, SHORT_MODULE_MINUTES, SHORT_MODULE_SCORE,
    TOO_EASY_PENALTY, TOO_HARD_PENALTY, TOPIC_WEIGHT, clamp_rating,
};

use super::types::{ModuleScore, rank_descending};

/// `1.0` if the user's preferred topic is the module's scam type, ignoring case.
pub fn topic_match(preferred_topic: &str, scam_type: &str) -> f32 {
    if preferred_topic.to_lowercase() == scam_type.to_lowercase() {
        1.0
    } else {
        0.0
    }
}

/// Symmetric closeness of the user's literacy to the module's target literacy.
pub fn literacy_match(literacy: f32, target_literacy: f32) -> f32 {
    (1.0 - (literacy - target_literacy).abs() / LEVEL_GAP_SCALE).max(0.0)
}

/// How well the module's difficulty suits the user's literacy.
///
/// A module above the user's level is penalized five times harder per unit of
/// gap than one below it.
pub fn difficulty_fit(literacy: f32, difficulty: f32) -> f32 {
    if difficulty <= literacy {
        1.0 - ((literacy - difficulty) / LEVEL_GAP_SCALE) * TOO_EASY_PENALTY
    } else {
        (1.0 - ((difficulty - literacy) / LEVEL_GAP_SCALE) * TOO_HARD_PENALTY).max(0.0)
    }
}

/// Short modules are preferred; there is no continuous penalty past the cutoff.
pub fn duration_preference(duration_min: f32) -> f32 {
    if duration_min <= SHORT_MODULE_MINUTES {
        SHORT_MODULE_SCORE
    } else {
        LONG_MODULE_SCORE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Unweighted sub-scores for one `(user, module)` pair.
pub struct ContentBreakdown {
    pub topic: f32,
    pub literacy: f32,
    pub difficulty: f32,
    pub duration: f32,
}

impl ContentBreakdown {
    pub fn compute(user: &User, module: &Module) -> Self {
        Self {
            topic: topic_match(&user.preferred_topic, &module.scam_type),
            literacy: literacy_match(user.digital_literacy, module.target_literacy),
            difficulty: difficulty_fit(user.digital_literacy, module.difficulty),
            duration: duration_preference(module.duration_min),
        }
    }

    /// Weighted sum in `[0, 1]`.
    pub fn raw(&self) -> f32 {
        self.topic * TOPIC_WEIGHT
            + self.literacy * LITERACY_WEIGHT
            + self.difficulty * DIFFICULTY_WEIGHT
            + self.duration * DURATION_WEIGHT
    }

    /// Weighted sum mapped onto the rating scale.
    pub fn rating(&self) -> f32 {
        clamp_rating(MIN_RATING + self.raw() * RATING_SPAN)
    }
}

/// Scores users against the module catalog using profile attributes only.
///
/// Users are read through a shared [`UserDirectory`], so a user registered
/// after construction is scored immediately.
pub struct ContentScorer {
    modules: Arc<[Module]>,
    module_index: HashMap<ModuleId, usize>,
    users: UserDirectory,
}

impl std::fmt::Debug for ContentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentScorer")
            .field("modules", &self.modules.len())
            .field("users", &self.users)
            .finish()
    }
}

impl ContentScorer {
    pub fn new(modules: impl Into<Arc<[Module]>>, users: UserDirectory) -> Self {
        let modules: Arc<[Module]> = modules.into();
        let module_index = modules
            .iter()
            .enumerate()
            .map(|(i, m)| (m.module_id, i))
            .collect();

        Self {
            modules,
            module_index,
            users,
        }
    }

    /// The module catalog, in catalog order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.iter().map(|m| m.module_id).collect()
    }

    pub fn module(&self, module_id: ModuleId) -> Option<&Module> {
        self.module_index.get(&module_id).map(|&i| &self.modules[i])
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Scores a known pair. Pure and deterministic.
    pub fn score_pair(user: &User, module: &Module) -> f32 {
        ContentBreakdown::compute(user, module).rating()
    }

    /// Scores by id; returns the neutral `2.5` if either id is unknown.
    pub fn score(&self, user_id: UserId, module_id: ModuleId) -> f32 {
        let user = self.users.get(user_id);
        self.score_for(user.as_ref(), module_id)
    }

    /// Scores against an already-resolved user (`None` = unknown user).
    pub fn score_for(&self, user: Option<&User>, module_id: ModuleId) -> f32 {
        match (user, self.module(module_id)) {
            (Some(user), Some(module)) => Self::score_pair(user, module),
            _ => NEUTRAL_CONTENT_SCORE,
        }
    }

    /// Sub-score breakdown, if both ids are known.
    pub fn breakdown(&self, user_id: UserId, module_id: ModuleId) -> Option<ContentBreakdown> {
        let module = self.module(module_id)?;
        self.users
            .with_user(user_id, |user| ContentBreakdown::compute(user, module))
    }

    /// Top `n` catalog modules for `user_id` by content score alone.
    pub fn top_n(&self, user_id: UserId, n: usize) -> Vec<ModuleScore> {
        let user = self.users.get(user_id);

        let mut scored: Vec<ModuleScore> = self
            .modules
            .iter()
            .map(|m| ModuleScore::new(m.module_id, self.score_for(user.as_ref(), m.module_id)))
            .collect();

        rank_descending(&mut scored, n, |s| s.score);

        debug!(
            user_id,
            known_user = user.is_some(),
            returned = scored.len(),
            "Content-only ranking complete"
        );

        scored
    }
}
