use std::collections::{HashMap, HashSet};

use crate::catalog::{ModuleId, Rating, UserId};
use crate::collaborative::CollaborativePredictor;
use crate::scoring::types::rank_descending;

use super::error::{EvaluationError, EvaluationResult};
use super::metrics::median;

/// Mean Precision@K of `predictor` over the held-out `test` ratings.
///
/// For each user the candidate set is every module that appears anywhere in
/// `test`; the top `k` by predicted rating are compared against the user's
/// relevant modules (test rating `>= threshold`). Hits are divided by `k`, not
/// by the list length. Users with no relevant module are skipped, and an
/// evaluation where every user is skipped scores `0`.
///
/// `threshold` defaults to the median test rating.
pub fn precision_at_k(
    predictor: &dyn CollaborativePredictor,
    test: &[Rating],
    k: usize,
    threshold: Option<f32>,
) -> EvaluationResult<f64> {
    if k == 0 {
        return Err(EvaluationError::InvalidK);
    }

    let ratings: Vec<f32> = test.iter().map(|r| r.rating).collect();
    let threshold = match threshold {
        Some(t) => t,
        None => median(&ratings).ok_or(EvaluationError::Empty)?,
    };

    let mut candidates: Vec<ModuleId> = Vec::new();
    let mut seen = HashSet::new();
    let mut relevant: HashMap<UserId, HashSet<ModuleId>> = HashMap::new();
    let mut users: Vec<UserId> = Vec::new();

    for r in test {
        if seen.insert(r.module_id) {
            candidates.push(r.module_id);
        }
        let entry = relevant.entry(r.user_id).or_insert_with(|| {
            users.push(r.user_id);
            HashSet::new()
        });
        if r.rating >= threshold {
            entry.insert(r.module_id);
        }
    }

    let mut precisions = Vec::new();
    for user_id in users {
        let Some(relevant) = relevant.get(&user_id).filter(|set| !set.is_empty()) else {
            continue;
        };

        let mut scored = candidates
            .iter()
            .map(|&module_id| -> EvaluationResult<(ModuleId, f32)> {
                Ok((module_id, predictor.predict(user_id, module_id)?))
            })
            .collect::<EvaluationResult<Vec<(ModuleId, f32)>>>()?;
        rank_descending(&mut scored, k, |&(_, score)| score);

        let hits = scored.iter().filter(|(m, _)| relevant.contains(m)).count();
        precisions.push(hits as f64 / k as f64);
    }

    if precisions.is_empty() {
        return Ok(0.0);
    }
    Ok(precisions.iter().sum::<f64>() / precisions.len() as f64)
}
