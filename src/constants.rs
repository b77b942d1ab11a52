//! Cross-cutting, shared constants.
//!
//! Every score produced by this crate lives on the rating scale
//! [`MIN_RATING`]..=[`MAX_RATING`]. Derived values (sub-score weights, the
//! content-scoring span) are expressed in terms of these so they cannot drift.

pub const MIN_RATING: f32 = 1.0;
pub const MAX_RATING: f32 = 5.0;

/// Width of the rating scale, used to map a unit score onto ratings.
pub const RATING_SPAN: f32 = MAX_RATING - MIN_RATING;

/// Content score returned when the user or the module is not in the catalog.
pub const NEUTRAL_CONTENT_SCORE: f32 = 2.5;

/// Share of the hybrid score taken by the collaborative signal.
pub const DEFAULT_COLLABORATIVE_WEIGHT: f32 = 0.7;

pub const DEFAULT_TOP_N: usize = 5;

/// Collaborative score reported for items ranked without the collaborative signal.
pub const CONTENT_ONLY_COLLABORATIVE_SCORE: f32 = 0.0;

pub const TOPIC_WEIGHT: f32 = 0.4;
pub const LITERACY_WEIGHT: f32 = 0.3;
pub const DIFFICULTY_WEIGHT: f32 = 0.2;
pub const DURATION_WEIGHT: f32 = 0.1;

/// Normaliser for literacy/difficulty gaps (width of the 1-5 ordinal scale plus one).
pub const LEVEL_GAP_SCALE: f32 = 5.0;

/// Penalty multiplier per normalised unit of gap when a module is below the user's level.
pub const TOO_EASY_PENALTY: f32 = 0.3;

/// Penalty multiplier per normalised unit of gap when a module is above the user's level.
pub const TOO_HARD_PENALTY: f32 = 1.5;

/// Modules at or under this many minutes get the full duration sub-score.
pub const SHORT_MODULE_MINUTES: f32 = 7.0;

pub const SHORT_MODULE_SCORE: f32 = 1.0;
pub const LONG_MODULE_SCORE: f32 = 0.7;

/// Clamps `score` onto the rating scale.
#[inline]
pub fn clamp_rating(score: f32) -> f32 {
    score.clamp(MIN_RATING, MAX_RATING)
}
