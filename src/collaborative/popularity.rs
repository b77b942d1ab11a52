use std::collections::HashMap;

use crate::catalog::{ModuleId, Rating, UserId};

use super::CollaborativePredictor;
use super::error::{CollaborativeError, CollaborativeResult};

#[derive(Debug, Clone)]
/// Predicts each module's mean rating, regardless of user.
///
/// Modules absent from the training log get the global mean.
pub struct PopularityBaseline {
    module_means: HashMap<ModuleId, f32>,
    global_mean: f32,
}

impl PopularityBaseline {
    /// Fits on a rating log. Fails on an empty log or a non-finite rating.
    pub fn fit(ratings: &[Rating]) -> CollaborativeResult<Self> {
        if ratings.is_empty() {
            return Err(CollaborativeError::EmptyTrainingSet);
        }

        let mut sums: HashMap<ModuleId, (f64, usize)> = HashMap::new();
        let mut total = 0.0f64;

        for rating in ratings {
            if !rating.rating.is_finite() {
                return Err(CollaborativeError::NonFiniteRating {
                    user_id: rating.user_id,
                    module_id: rating.module_id,
                });
            }
            let entry = sums.entry(rating.module_id).or_insert((0.0, 0));
            entry.0 += rating.rating as f64;
            entry.1 += 1;
            total += rating.rating as f64;
        }

        let module_means = sums
            .into_iter()
            .map(|(id, (sum, n))| (id, (sum / n as f64) as f32))
            .collect();

        Ok(Self {
            module_means,
            global_mean: (total / ratings.len() as f64) as f32,
        })
    }

    pub fn global_mean(&self) -> f32 {
        self.global_mean
    }

    pub fn known_modules(&self) -> usize {
        self.module_means.len()
    }
}

impl CollaborativePredictor for PopularityBaseline {
    fn predict(&self, _user_id: UserId, module_id: ModuleId) -> CollaborativeResult<f32> {
        Ok(self
            .module_means
            .get(&module_id)
            .copied()
            .unwrap_or(self.global_mean))
    }

    fn name(&self) -> &'static str {
        "Most Popular Baseline"
    }
}
