//! Matrix-factorization model served from a JSON artifact.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "global_mean": 3.4,
//!   "users":   { "1": { "bias": 0.1,  "factors": [0.2, -0.1] } },
//!   "modules": { "7": { "bias": -0.3, "factors": [0.5, 0.4] } }
//! }
//! ```
//!
//! Prediction is `global_mean + user.bias + module.bias + dot(user.factors, module.factors)`.
//! Training happens elsewhere; this type only serves the result.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{ModuleId, UserId};

use super::CollaborativePredictor;
use super::error::{CollaborativeError, CollaborativeResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Learned bias and latent vector for one user or module.
pub struct FactorRow {
    #[serde(default)]
    pub bias: f32,
    pub factors: Vec<f32>,
}

impl FactorRow {
    pub fn new(bias: f32, factors: Vec<f32>) -> Self {
        Self { bias, factors }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorModel {
    global_mean: f32,
    users: HashMap<UserId, FactorRow>,
    modules: HashMap<ModuleId, FactorRow>,
    #[serde(skip)]
    rank: usize,
}

impl FactorModel {
    /// Builds a model from in-memory rows, validating factor ranks.
    pub fn new(
        global_mean: f32,
        users: HashMap<UserId, FactorRow>,
        modules: HashMap<ModuleId, FactorRow>,
    ) -> CollaborativeResult<Self> {
        let mut model = Self {
            global_mean,
            users,
            modules,
            rank: 0,
        };
        model.rank = model.validate()?;
        Ok(model)
    }

    /// Loads a model artifact from `path`.
    pub fn load(path: &Path) -> CollaborativeResult<Self> {
        let bytes = fs::read(path).map_err(|source| CollaborativeError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;

        let model = Self::from_slice(&bytes)?;

        info!(
            path = %path.display(),
            users = model.users.len(),
            modules = model.modules.len(),
            rank = model.rank,
            "Loaded factor model"
        );

        Ok(model)
    }

    /// Parses a JSON artifact.
    pub fn from_slice(bytes: &[u8]) -> CollaborativeResult<Self> {
        let mut model: Self = serde_json::from_slice(bytes).map_err(|e| {
            CollaborativeError::MalformedArtifact {
                reason: e.to_string(),
            }
        })?;
        model.rank = model.validate()?;
        Ok(model)
    }

    /// Serializes the model back to its artifact form.
    pub fn to_json(&self) -> CollaborativeResult<String> {
        serde_json::to_string(self).map_err(|e| CollaborativeError::MalformedArtifact {
            reason: e.to_string(),
        })
    }

    /// Latent dimension shared by every row.
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn global_mean(&self) -> f32 {
        self.global_mean
    }

    pub fn knows_user(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    pub fn knows_module(&self, module_id: ModuleId) -> bool {
        self.modules.contains_key(&module_id)
    }

    fn validate(&self) -> CollaborativeResult<usize> {
        if !self.global_mean.is_finite() {
            return Err(CollaborativeError::MalformedArtifact {
                reason: "global_mean is not finite".to_string(),
            });
        }

        let rows = || self.users.values().chain(self.modules.values());
        let rank = rows().next().map_or(0, |row| row.factors.len());

        for row in rows() {
            if row.factors.len() != rank {
                return Err(CollaborativeError::MalformedArtifact {
                    reason: format!(
                        "factor rank mismatch: expected {}, found {}",
                        rank,
                        row.factors.len()
                    ),
                });
            }
            if !row.bias.is_finite() || row.factors.iter().any(|f| !f.is_finite()) {
                return Err(CollaborativeError::MalformedArtifact {
                    reason: "non-finite bias or factor".to_string(),
                });
            }
        }

        Ok(rank)
    }
}

impl CollaborativePredictor for FactorModel {
    fn predict(&self, user_id: UserId, module_id: ModuleId) -> CollaborativeResult<f32> {
        let user = self
            .users
            .get(&user_id)
            .ok_or(CollaborativeError::UnknownUser { user_id })?;
        let module = self
            .modules
            .get(&module_id)
            .ok_or(CollaborativeError::UnknownModule { module_id })?;

        let interaction: f32 = user
            .factors
            .iter()
            .zip(&module.factors)
            .map(|(u, m)| u * m)
            .sum();
        let score = self.global_mean + user.bias + module.bias + interaction;

        if !score.is_finite() {
            return Err(CollaborativeError::NonFinite { user_id, module_id });
        }
        Ok(score)
    }

    fn name(&self) -> &'static str {
        "Matrix Factorization"
    }
}
