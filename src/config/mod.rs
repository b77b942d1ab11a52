//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SHIELDREC_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{DEFAULT_COLLABORATIVE_WEIGHT, DEFAULT_TOP_N};

/// Which collaborative predictor backs the hybrid ranker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PredictorKind {
    /// Pre-trained latent-factor artifact loaded from `model_path`.
    #[default]
    Factor,
    /// Per-module mean ratings fitted from the rating log at startup.
    Popularity,
}

impl PredictorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictorKind::Factor => "factor",
            PredictorKind::Popularity => "popularity",
        }
    }
}

impl FromStr for PredictorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "factor" => Ok(PredictorKind::Factor),
            "popularity" => Ok(PredictorKind::Popularity),
            _ => Err(ConfigError::InvalidPredictor {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommender configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SHIELDREC_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `users.csv`, `modules.csv` and `ratings.csv`. Default: `./data`.
    pub data_path: PathBuf,

    /// Path to the factor-model JSON artifact. Required for [`PredictorKind::Factor`].
    pub model_path: Option<PathBuf>,

    /// Collaborative predictor. Default: `factor`.
    pub predictor: PredictorKind,

    /// Collaborative share of the hybrid score. Default: `0.7`.
    pub collaborative_weight: f32,

    /// Default recommendation list length. Default: `5`.
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./data"),
            model_path: None,
            predictor: PredictorKind::default(),
            collaborative_weight: DEFAULT_COLLABORATIVE_WEIGHT,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Config {
    pub const ENV_DATA_PATH: &'static str = "SHIELDREC_DATA_PATH";
    pub const ENV_MODEL_PATH: &'static str = "SHIELDREC_MODEL_PATH";
    pub const ENV_PREDICTOR: &'static str = "SHIELDREC_PREDICTOR";
    pub const ENV_COLLABORATIVE_WEIGHT: &'static str = "SHIELDREC_COLLABORATIVE_WEIGHT";
    pub const ENV_TOP_N: &'static str = "SHIELDREC_TOP_N";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Only an unrecognised predictor name is an error; unparseable numbers
    /// fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_path = Self::parse_path_from_env(Self::ENV_DATA_PATH, defaults.data_path);
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let predictor = Self::parse_predictor_from_env(defaults.predictor)?;
        let collaborative_weight = Self::parse_f32_from_env(
            Self::ENV_COLLABORATIVE_WEIGHT,
            defaults.collaborative_weight,
        );
        let top_n = Self::parse_usize_from_env(Self::ENV_TOP_N, defaults.top_n);

        Ok(Self {
            data_path,
            model_path,
            predictor,
            collaborative_weight,
            top_n,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.data_path.clone(),
            });
        }
        if !self.data_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.data_path.clone(),
            });
        }

        if self.predictor == PredictorKind::Factor && self.model_path.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_MODEL_PATH,
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if self.top_n == 0 {
            return Err(ConfigError::InvalidTopN { value: self.top_n });
        }

        Ok(())
    }

    fn parse_predictor_from_env(default: PredictorKind) -> Result<PredictorKind, ConfigError> {
        match env::var(Self::ENV_PREDICTOR) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_f32_from_env(var_name: &str, default: f32) -> f32 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
