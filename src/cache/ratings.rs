use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::catalog::{Rating, UserId};

#[derive(Clone, Default)]
/// Per-user rating counts, updated as ratings are appended.
pub struct RatingIndex {
    counts: Arc<RwLock<HashMap<UserId, usize>>>,
}

impl RatingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes an existing rating log.
    pub fn from_ratings<'a>(ratings: impl IntoIterator<Item = &'a Rating>) -> Self {
        let mut counts = HashMap::new();
        for rating in ratings {
            *counts.entry(rating.user_id).or_insert(0) += 1;
        }
        Self {
            counts: Arc::new(RwLock::new(counts)),
        }
    }

    /// Records one new rating by `user_id`.
    #[inline]
    pub fn record(&self, user_id: UserId) {
        *self.counts.write().entry(user_id).or_insert(0) += 1;
    }

    /// Returns `true` if `user_id` has rated anything.
    #[inline]
    pub fn has_ratings(&self, user_id: UserId) -> bool {
        self.counts.read().contains_key(&user_id)
    }

    #[inline]
    pub fn rating_count(&self, user_id: UserId) -> usize {
        self.counts.read().get(&user_id).copied().unwrap_or(0)
    }

    /// Number of distinct users with at least one rating.
    #[inline]
    pub fn rated_users(&self) -> usize {
        self.counts.read().len()
    }

    /// Total ratings indexed.
    pub fn total_ratings(&self) -> usize {
        self.counts.read().values().sum()
    }
}

impl std::fmt::Debug for RatingIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingIndex")
            .field("rated_users", &self.rated_users())
            .finish()
    }
}
