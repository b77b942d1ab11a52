use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::catalog::{ModuleId, UserId};

use super::CollaborativePredictor;
use super::error::{CollaborativeError, CollaborativeResult};

/// Scripted predictor that counts calls and can be told to fail.
#[derive(Debug)]
pub struct MockPredictor {
    default_score: f32,
    scores: RwLock<HashMap<(UserId, ModuleId), f32>>,
    failing_users: RwLock<HashSet<UserId>>,
    fail_all: AtomicBool,
    calls: AtomicUsize,
}

impl MockPredictor {
    /// Predicts `default_score` for every pair not explicitly scripted.
    pub fn new(default_score: f32) -> Self {
        Self {
            default_score,
            scores: RwLock::new(HashMap::new()),
            failing_users: RwLock::new(HashSet::new()),
            fail_all: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_score(self, user_id: UserId, module_id: ModuleId, score: f32) -> Self {
        self.scores.write().insert((user_id, module_id), score);
        self
    }

    /// Makes every prediction for `user_id` fail with `UnknownUser`.
    pub fn failing_for(self, user_id: UserId) -> Self {
        self.failing_users.write().insert(user_id);
        self
    }

    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Number of `predict` calls so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl Default for MockPredictor {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl CollaborativePredictor for MockPredictor {
    fn predict(&self, user_id: UserId, module_id: ModuleId) -> CollaborativeResult<f32> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all.load(Ordering::SeqCst) || self.failing_users.read().contains(&user_id) {
            return Err(CollaborativeError::UnknownUser { user_id });
        }

        Ok(self
            .scores
            .read()
            .get(&(user_id, module_id))
            .copied()
            .unwrap_or(self.default_score))
    }

    fn name(&self) -> &'static str {
        "Mock"
    }
}
