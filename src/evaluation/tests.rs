use super::*;
use crate::catalog::Rating;
use crate::collaborative::{CollaborativeError, MockPredictor, PopularityBaseline};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_mae_and_rmse() {
    let actual = [1.0, 2.0, 3.0, 4.0];
    let predicted = [2.0, 2.0, 3.0, 2.0];

    assert_close(mae(&actual, &predicted).unwrap(), 0.75);
    assert_close(rmse(&actual, &predicted).unwrap(), (5.0f64 / 4.0).sqrt());
}

#[test]
fn test_perfect_predictions() {
    let actual = [1.5, 3.0, 4.5];

    assert_close(mae(&actual, &actual).unwrap(), 0.0);
    assert_close(rmse(&actual, &actual).unwrap(), 0.0);
    assert_close(r_squared(&actual, &actual).unwrap(), 1.0);
}

#[test]
fn test_r_squared() {
    let actual = [1.0, 2.0, 3.0];
    let predicted = [1.0, 2.0, 4.0];

    // ss_total = 2, ss_residual = 1
    assert_close(r_squared(&actual, &predicted).unwrap(), 0.5);
}

#[test]
fn test_r_squared_without_variance_is_zero() {
    assert_close(r_squared(&[3.0, 3.0, 3.0], &[1.0, 5.0, 2.0]).unwrap(), 0.0);
}

#[test]
fn test_metrics_reject_bad_input() {
    assert!(matches!(
        mae(&[1.0, 2.0], &[1.0]),
        Err(EvaluationError::LengthMismatch {
            actual: 2,
            predicted: 1
        })
    ));
    assert!(matches!(rmse(&[], &[]), Err(EvaluationError::Empty)));
    assert!(matches!(r_squared(&[], &[]), Err(EvaluationError::Empty)));
}

#[test]
fn test_median() {
    assert_eq!(median(&[]), None);
    assert_eq!(median(&[4.0, 1.0, 3.0]), Some(3.0));
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
}

fn ranking_fixture() -> (MockPredictor, Vec<Rating>) {
    // User 1 likes modules 1 and 2; the mock ranks 1 and 3 highest for them.
    let predictor = MockPredictor::new(2.0)
        .with_score(1, 1, 5.0)
        .with_score(1, 3, 4.5)
        .with_score(2, 2, 4.0);

    let test = vec![
        Rating::new(1, 1, 5.0),
        Rating::new(1, 2, 4.0),
        Rating::new(1, 3, 1.0),
        Rating::new(2, 2, 5.0),
        Rating::new(2, 3, 1.0),
        Rating::new(3, 1, 1.0),
    ];

    (predictor, test)
}

#[test]
fn test_precision_at_k_divides_by_k() {
    let (predictor, test) = ranking_fixture();

    // Threshold 4: user 1 relevant {1, 2}, top-2 {1, 3} -> 0.5.
    // User 2 relevant {2}, top-2 {2, 1} -> 0.5. User 3 has nothing relevant.
    let p = precision_at_k(&predictor, &test, 2, Some(4.0)).unwrap();
    assert_close(p, 0.5);

    // With k larger than the candidate count, hits are still divided by k.
    let p = precision_at_k(&predictor, &test, 5, Some(4.0)).unwrap();
    assert_close(p, (2.0 / 5.0 + 1.0 / 5.0) / 2.0);
}

#[test]
fn test_precision_at_k_defaults_to_median_threshold() {
    let (predictor, test) = ranking_fixture();

    // Ratings [5, 4, 1, 5, 1, 1] have median 2.5, same relevance as threshold 4.
    let with_median = precision_at_k(&predictor, &test, 2, None).unwrap();
    let explicit = precision_at_k(&predictor, &test, 2, Some(2.5)).unwrap();
    assert_close(with_median, explicit);
    assert_close(with_median, 0.5);
}

#[test]
fn test_precision_at_k_all_users_skipped() {
    let (predictor, test) = ranking_fixture();

    let p = precision_at_k(&predictor, &test, 2, Some(5.5)).unwrap();
    assert_close(p, 0.0);
    // Skipped users are never ranked.
    assert_eq!(predictor.call_count(), 0);
}

#[test]
fn test_precision_at_k_rejects_zero_k_and_empty_input() {
    let (predictor, test) = ranking_fixture();

    assert!(matches!(
        precision_at_k(&predictor, &test, 0, None),
        Err(EvaluationError::InvalidK)
    ));
    assert!(matches!(
        precision_at_k(&predictor, &[], 5, None),
        Err(EvaluationError::Empty)
    ));
}

#[test]
fn test_evaluate_popularity_baseline() {
    let train = vec![
        Rating::new(1, 1, 4.0),
        Rating::new(2, 1, 2.0),
        Rating::new(1, 2, 5.0),
    ];
    let baseline = PopularityBaseline::fit(&train).unwrap();

    let metrics = evaluate_predictor(&baseline, &train, None).unwrap();

    assert_eq!(metrics.model_name, "Most Popular Baseline");
    // Predictions are [3, 3, 5] against [4, 2, 5].
    assert_close(metrics.mae, 2.0 / 3.0);
    assert_close(metrics.rmse, (2.0f64 / 3.0).sqrt());
    assert!(metrics.precision_at_k.is_none());
}

#[test]
fn test_evaluate_with_precision() {
    let (predictor, test) = ranking_fixture();

    let metrics = evaluate_predictor(&predictor, &test, Some(2)).unwrap();

    let (k, p) = metrics.precision_at_k.unwrap();
    assert_eq!(k, 2);
    assert_close(p, 0.5);
}

#[test]
fn test_evaluate_propagates_prediction_failure() {
    let predictor = MockPredictor::default().failing_for(7);
    let test = vec![Rating::new(1, 1, 3.0), Rating::new(7, 1, 4.0)];

    let result = evaluate_predictor(&predictor, &test, None);

    assert!(matches!(
        result,
        Err(EvaluationError::Predictor(CollaborativeError::UnknownUser { user_id: 7 }))
    ));
}

#[test]
fn test_metrics_display() {
    let metrics = ModelMetrics {
        model_name: "Matrix Factorization".to_string(),
        mae: 0.71234,
        rmse: 0.9,
        r_squared: 0.25,
        precision_at_k: Some((5, 0.4)),
    };

    let line = metrics.to_string();
    assert!(line.starts_with("Matrix Factorization"));
    assert!(line.contains("MAE: 0.7123"));
    assert!(line.contains("P@5: 0.4000"));

    let line = ModelMetrics {
        precision_at_k: None,
        ..metrics
    }
    .to_string();
    assert!(line.ends_with("P@K: N/A"));
}
