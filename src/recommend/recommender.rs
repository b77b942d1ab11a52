use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::cache::{RatingIndex, UserDirectory};
use crate::catalog::{Module, ModuleId, NewUser, Rating, User, UserId};
use crate::collaborative::{CollaborativePredictor, FactorModel, PopularityBaseline};
use crate::config::{Config, ConfigError, PredictorKind};
use crate::constants::{
    CONTENT_ONLY_COLLABORATIVE_SCORE, DEFAULT_COLLABORATIVE_WEIGHT, DEFAULT_TOP_N,
};
use crate::evaluation::{self, ModelMetrics};
use crate::scoring::types::rank_descending;
use crate::scoring::{ContentScorer, HybridRanker, ScoredCandidate};
use crate::storage::{CsvStore, ModuleStore, RatingStore, UserStore};

use super::error::{RecommendError, RecommendResult};
use super::types::{RecommendationMode, RecommendationSet, RecommenderStats};

#[derive(Debug, Clone, Copy, PartialEq)]
/// Tunable ranking policy.
pub struct RecommenderSettings {
    /// Collaborative share of the hybrid score (clamped to `[0, 1]` by the ranker).
    pub collaborative_weight: f32,
    /// List length used when a caller does not ask for one.
    pub default_top_n: usize,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            collaborative_weight: DEFAULT_COLLABORATIVE_WEIGHT,
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl RecommenderSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            collaborative_weight: config.collaborative_weight,
            default_top_n: config.top_n,
        }
    }

    pub fn with_collaborative_weight(mut self, weight: f32) -> Self {
        self.collaborative_weight = weight;
        self
    }

    pub fn with_default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }
}

#[derive(Clone)]
/// The three storage collaborators the recommender reads at startup and writes through to.
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub modules: Arc<dyn ModuleStore>,
    pub ratings: Arc<dyn RatingStore>,
}

impl Stores {
    /// Uses one backend for all three record types.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: UserStore + ModuleStore + RatingStore + 'static,
    {
        Self {
            users: store.clone(),
            modules: store.clone(),
            ratings: store,
        }
    }
}

/// Per-request strategy selection plus the mutable user directory.
pub struct Recommender {
    ranker: HybridRanker,
    content: Arc<ContentScorer>,
    module_ids: Vec<ModuleId>,
    users: UserDirectory,
    ratings: RatingIndex,
    stores: Stores,
    registration_lock: Mutex<()>,
    settings: RecommenderSettings,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("ranker", &self.ranker)
            .field("modules", &self.module_ids.len())
            .field("users", &self.users)
            .field("ratings", &self.ratings)
            .field("settings", &self.settings)
            .finish()
    }
}

impl Recommender {
    /// Loads users, modules and the rating log from `stores` and wires up the rankers.
    ///
    /// Any load failure is returned; callers should treat it as fatal.
    pub fn load(
        stores: Stores,
        predictor: Arc<dyn CollaborativePredictor>,
        settings: RecommenderSettings,
    ) -> RecommendResult<Self> {
        let (modules, users, ratings) = Self::load_records(&stores)?;

        info!(
            users = users.len(),
            modules = modules.len(),
            ratings = ratings.len(),
            predictor = predictor.name(),
            "Loaded recommender state"
        );

        Ok(Self::from_parts(
            modules, users, &ratings, stores, predictor, settings,
        ))
    }

    fn load_records(stores: &Stores) -> RecommendResult<(Vec<Module>, Vec<User>, Vec<Rating>)> {
        Ok((
            stores.modules.load_all()?,
            stores.users.load_all()?,
            stores.ratings.load_all()?,
        ))
    }

    /// Builds the recommender described by `config`: CSV stores under the data
    /// directory and the configured collaborative predictor.
    pub fn from_config(config: &Config) -> RecommendResult<Self> {
        let store = Arc::new(CsvStore::new(config.data_path.clone()));
        store.ensure_data_path()?;
        let stores = Stores::shared(store);
        let (modules, users, ratings) = Self::load_records(&stores)?;

        let predictor: Arc<dyn CollaborativePredictor> = match config.predictor {
            PredictorKind::Factor => {
                let path = config
                    .model_path
                    .as_deref()
                    .ok_or(ConfigError::MissingEnvVar {
                        name: Config::ENV_MODEL_PATH,
                    })?;
                Arc::new(FactorModel::load(path)?)
            }
            PredictorKind::Popularity => Arc::new(PopularityBaseline::fit(&ratings)?),
        };

        info!(
            data_path = %config.data_path.display(),
            users = users.len(),
            modules = modules.len(),
            ratings = ratings.len(),
            predictor = predictor.name(),
            "Loaded recommender state"
        );

        Ok(Self::from_parts(
            modules,
            users,
            &ratings,
            stores,
            predictor,
            RecommenderSettings::from_config(config),
        ))
    }

    /// Builds a recommender from already-loaded records.
    pub fn from_parts(
        modules: Vec<Module>,
        users: Vec<User>,
        ratings: &[Rating],
        stores: Stores,
        predictor: Arc<dyn CollaborativePredictor>,
        settings: RecommenderSettings,
    ) -> Self {
        let users = UserDirectory::from_users(users);
        let content = Arc::new(ContentScorer::new(modules, users.clone()));
        let ranker = HybridRanker::new(predictor, content.clone(), settings.collaborative_weight);
        let module_ids = content.module_ids();

        Self {
            ranker,
            content,
            module_ids,
            users,
            ratings: RatingIndex::from_ratings(ratings),
            stores,
            registration_lock: Mutex::new(()),
            settings,
        }
    }

    pub fn settings(&self) -> &RecommenderSettings {
        &self.settings
    }

    pub fn ranker(&self) -> &HybridRanker {
        &self.ranker
    }

    pub fn content_scorer(&self) -> &ContentScorer {
        &self.content
    }

    pub fn modules(&self) -> &[Module] {
        self.content.modules()
    }

    pub fn module(&self, module_id: ModuleId) -> Option<&Module> {
        self.content.module(module_id)
    }

    pub fn user(&self, user_id: UserId) -> Option<User> {
        self.users.get(user_id)
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Returns `true` if the user has at least one rating on record.
    pub fn has_ratings(&self, user_id: UserId) -> bool {
        self.ratings.has_ratings(user_id)
    }

    pub fn stats(&self) -> RecommenderStats {
        RecommenderStats {
            users: self.users.len(),
            modules: self.module_ids.len(),
            ratings: self.ratings.total_ratings(),
            rated_users: self.ratings.rated_users(),
        }
    }

    /// Ranked recommendations for `user_id`. Never fails.
    ///
    /// With `content_only` the collaborative predictor is not consulted at all.
    /// Otherwise the hybrid ranker runs over the whole catalog, and if the
    /// predictor fails the request is answered content-only instead.
    pub fn get_recommendations(
        &self,
        user_id: UserId,
        top_n: usize,
        content_only: bool,
    ) -> RecommendationSet {
        if content_only {
            return self.content_only(user_id, top_n, RecommendationMode::ContentOnly);
        }

        match self.ranker.rank_detailed(user_id, &self.module_ids, top_n) {
            Ok(items) => {
                debug!(user_id, count = items.len(), mode = "hybrid", "Recommendations ready");
                RecommendationSet {
                    user_id,
                    mode: RecommendationMode::Hybrid,
                    items,
                }
            }
            Err(e) => {
                let predictor = self.ranker.predictor_name();
                if e.is_prediction_failure() {
                    warn!(
                        user_id,
                        predictor,
                        error = %e,
                        "Collaborative prediction failed; degrading to content-only ranking"
                    );
                } else {
                    error!(
                        user_id,
                        predictor,
                        error = %e,
                        "Collaborative predictor unavailable; degrading to content-only ranking"
                    );
                }
                self.content_only(user_id, top_n, RecommendationMode::Fallback)
            }
        }
    }

    /// Looks the user up, decides hybrid vs content-only from the rating
    /// index, and ranks. `top_n` defaults to the configured list length.
    pub fn recommend(
        &self,
        user_id: UserId,
        top_n: Option<usize>,
    ) -> RecommendResult<RecommendationSet> {
        if !self.users.contains(user_id) {
            return Err(RecommendError::UserNotFound { user_id });
        }

        let content_only = !self.ratings.has_ratings(user_id);
        if content_only {
            info!(user_id, "User has no ratings; using content-based ranking");
        }

        Ok(self.get_recommendations(
            user_id,
            top_n.unwrap_or(self.settings.default_top_n),
            content_only,
        ))
    }

    fn content_only(
        &self,
        user_id: UserId,
        top_n: usize,
        mode: RecommendationMode,
    ) -> RecommendationSet {
        let user = self.users.get(user_id);

        let mut items: Vec<ScoredCandidate> = self
            .module_ids
            .iter()
            .map(|&module_id| {
                let content = self.content.score_for(user.as_ref(), module_id);
                ScoredCandidate::new(module_id, content, CONTENT_ONLY_COLLABORATIVE_SCORE, content)
            })
            .collect();

        rank_descending(&mut items, top_n, |c| c.hybrid_score);

        debug!(user_id, count = items.len(), mode = %mode, "Recommendations ready");

        RecommendationSet {
            user_id,
            mode,
            items,
        }
    }

    /// Inserts or replaces a user in the directory. The content scorer sees
    /// the change immediately; nothing is written to storage.
    pub fn add_user(&self, user: User) {
        let user_id = user.user_id;
        if self.users.insert(user).is_some() {
            debug!(user_id, "Replaced cached user");
        } else {
            debug!(user_id, "Cached new user");
        }
    }

    /// Registers a new user: assigns an id above every stored and cached id,
    /// derives the defaults, appends to the user store, then caches.
    /// Concurrent registrations are serialized.
    pub fn register_user(&self, request: NewUser) -> RecommendResult<User> {
        let _guard = self.registration_lock.lock();

        // Cached-only users from `add_user` also hold ids.
        let cached_next = self.users.max_id().map_or(1, |max| max + 1);
        let user_id = self.stores.users.next_id()?.max(cached_next);
        let user = request.into_user(user_id);

        self.stores.users.append(&user)?;
        self.add_user(user.clone());

        info!(
            user_id,
            literacy = user.digital_literacy,
            risk_profile = %user.risk_profile,
            topic = %user.preferred_topic,
            "Registered user"
        );

        Ok(user)
    }

    /// Appends a rating to the log and marks the user as having history.
    ///
    /// The collaborative model is not retrained; the rating only changes which
    /// strategy [`recommend`](Self::recommend) picks.
    pub fn record_rating(&self, rating: Rating) -> RecommendResult<()> {
        if !rating.is_valid() {
            return Err(RecommendError::InvalidRating {
                value: rating.rating,
            });
        }
        if !self.users.contains(rating.user_id) {
            return Err(RecommendError::UserNotFound {
                user_id: rating.user_id,
            });
        }
        if self.content.module(rating.module_id).is_none() {
            return Err(RecommendError::ModuleNotFound {
                module_id: rating.module_id,
            });
        }

        self.stores.ratings.append(&rating)?;
        self.ratings.record(rating.user_id);

        info!(
            user_id = rating.user_id,
            module_id = rating.module_id,
            rating = rating.rating,
            "Recorded rating"
        );

        Ok(())
    }

    /// Scores the collaborative predictor against the full rating log as
    /// currently stored, including ratings recorded since startup.
    pub fn evaluate(&self, precision_k: Option<usize>) -> RecommendResult<ModelMetrics> {
        let ratings = self.stores.ratings.load_all()?;
        let metrics = evaluation::evaluate_predictor(self.ranker.predictor(), &ratings, precision_k)?;
        info!(%metrics, "Evaluated collaborative predictor");
        Ok(metrics)
    }
}
