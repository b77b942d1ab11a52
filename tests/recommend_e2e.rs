//! End-to-end tests over an on-disk data directory.

mod common;

use shieldrec::config::{Config, ConfigError, PredictorKind};
use shieldrec::storage::StorageError;
use shieldrec::{
    CollaborativeError, NewUser, Rating, RecommendError, RecommendationMode, RecommendationSet,
    Recommender, RiskProfile,
};

use common::fixtures::DataDir;

fn factor_config(data: &DataDir) -> Config {
    Config {
        data_path: data.path().to_path_buf(),
        model_path: Some(data.with_model()),
        predictor: PredictorKind::Factor,
        ..Default::default()
    }
}

fn popularity_config(data: &DataDir) -> Config {
    Config {
        data_path: data.path().to_path_buf(),
        predictor: PredictorKind::Popularity,
        ..Default::default()
    }
}

fn assert_ranked(set: &RecommendationSet) {
    for pair in set.items.windows(2) {
        assert!(pair[0].hybrid_score >= pair[1].hybrid_score);
    }
    for item in &set.items {
        assert!((1.0..=5.0).contains(&item.hybrid_score));
        assert!((1.0..=5.0).contains(&item.content_score));
    }
}

#[test]
fn test_rated_user_gets_hybrid_recommendations() {
    let data = DataDir::seeded();
    let recommender = Recommender::from_config(&factor_config(&data)).expect("should load");

    let set = recommender.recommend(1, None).expect("user 1 exists");

    assert_eq!(set.mode, RecommendationMode::Hybrid);
    assert_eq!(set.len(), 5);
    assert_ranked(&set);
    let m2 = set.items.iter().find(|i| i.module_id == 2).unwrap();
    assert!((m2.collaborative_score - 4.9).abs() < 1e-4);
}

#[test]
fn test_unrated_user_gets_content_recommendations() {
    let data = DataDir::seeded();
    let recommender = Recommender::from_config(&factor_config(&data)).expect("should load");

    let set = recommender.recommend(2, Some(2)).expect("user 2 exists");

    assert_eq!(set.mode, RecommendationMode::ContentOnly);
    assert_eq!(set.len(), 2);
    assert_eq!(set.items[0].module_id, 2);
    assert!(set.items.iter().all(|i| i.collaborative_score == 0.0));
}

#[test]
fn test_unknown_user_is_reported() {
    let data = DataDir::seeded();
    let recommender = Recommender::from_config(&factor_config(&data)).expect("should load");

    assert!(matches!(
        recommender.recommend(404, None),
        Err(RecommendError::UserNotFound { user_id: 404 })
    ));
}

#[test]
fn test_registration_and_rating_survive_restart() {
    let data = DataDir::seeded();
    let config = factor_config(&data);

    {
        let recommender = Recommender::from_config(&config).expect("should load");
        let user = recommender
            .register_user(NewUser::new(1.0, "65+", "investment_fraud"))
            .expect("register");
        assert_eq!(user.user_id, 4);
        assert_eq!(user.risk_profile, RiskProfile::High);

        recommender
            .record_rating(Rating::new(4, 5, 4.5))
            .expect("record rating");
    }

    let users = data.read("users.csv");
    assert!(users.lines().last().unwrap().starts_with("4,"));
    assert!(data.read("ratings.csv").ends_with("4,5,4.5\n"));

    let recommender = Recommender::from_config(&config).expect("should reload");
    assert_eq!(
        recommender.user(4).map(|u| u.preferred_topic),
        Some("investment_fraud".to_string())
    );
    assert!(recommender.has_ratings(4));
    assert_eq!(recommender.stats().ratings, 4);
}

#[test]
fn test_user_unknown_to_model_falls_back() {
    let data = DataDir::seeded();
    let recommender = Recommender::from_config(&factor_config(&data)).expect("should load");

    // User 2 is in the catalog but not in the factor artifact.
    recommender
        .record_rating(Rating::new(2, 2, 5.0))
        .expect("record rating");
    let set = recommender.recommend(2, None).expect("user 2 exists");

    assert_eq!(set.mode, RecommendationMode::Fallback);
    assert_eq!(set.len(), 5);
    assert_ranked(&set);
}

#[test]
fn test_popularity_predictor_from_rating_log() {
    let data = DataDir::seeded();
    let recommender = Recommender::from_config(&popularity_config(&data)).expect("should load");

    let set = recommender.recommend(3, None).expect("user 3 exists");
    assert_eq!(set.mode, RecommendationMode::Hybrid);

    let metrics = recommender.evaluate(Some(5)).expect("evaluate");
    assert_eq!(metrics.model_name, "Most Popular Baseline");
    assert!(metrics.mae >= 0.0);
    assert!(metrics.precision_at_k.is_some());
}

#[test]
fn test_factor_model_evaluation() {
    let data = DataDir::seeded();
    let recommender = Recommender::from_config(&factor_config(&data)).expect("should load");

    let metrics = recommender.evaluate(Some(5)).expect("evaluate");

    assert_eq!(metrics.model_name, "Matrix Factorization");
    assert!(metrics.rmse >= metrics.mae);
    assert!(metrics.to_string().contains("P@5"));
}

#[test]
fn test_empty_data_directory_needs_module_catalog() {
    let data = DataDir::empty();

    let result = Recommender::from_config(&popularity_config(&data));

    assert!(matches!(
        result,
        Err(RecommendError::Storage(StorageError::NotFound { .. }))
    ));
}

#[test]
fn test_catalog_without_users_or_ratings() {
    let data = DataDir::empty();
    data.write("modules.csv", common::fixtures::MODULES_CSV);

    let recommender = Recommender::from_config(&factor_config(&data)).expect("should load");
    let user = recommender
        .register_user(NewUser::new(3.0, "26-35", "phishing"))
        .expect("register");

    assert_eq!(user.user_id, 1);
    assert!(data.read("users.csv").starts_with("user_id,"));
    assert_eq!(
        recommender.recommend(1, Some(1)).unwrap().mode,
        RecommendationMode::ContentOnly
    );
}

#[test]
fn test_popularity_needs_a_rating_log() {
    let data = DataDir::empty();
    data.write("modules.csv", common::fixtures::MODULES_CSV);

    assert!(matches!(
        Recommender::from_config(&popularity_config(&data)),
        Err(RecommendError::Predictor(CollaborativeError::EmptyTrainingSet))
    ));
}

#[test]
fn test_factor_predictor_requires_model_path() {
    let data = DataDir::seeded();
    let config = Config {
        model_path: None,
        ..factor_config(&data)
    };

    assert!(matches!(
        Recommender::from_config(&config),
        Err(RecommendError::Config(ConfigError::MissingEnvVar { .. }))
    ));
}

#[test]
fn test_malformed_model_is_fatal() {
    let data = DataDir::seeded();
    let model_path = data.write(
        "model.json",
        r#"{"global_mean": 3.0, "users": {"1": {"factors": [1.0]}}, "modules": {"1": {"factors": [1.0, 2.0]}}}"#,
    );
    let config = Config {
        data_path: data.path().to_path_buf(),
        model_path: Some(model_path),
        predictor: PredictorKind::Factor,
        ..Default::default()
    };

    assert!(matches!(
        Recommender::from_config(&config),
        Err(RecommendError::Predictor(CollaborativeError::MalformedArtifact { .. }))
    ));
}
