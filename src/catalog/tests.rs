use super::*;

#[test]
fn test_risk_profile_from_literacy() {
    assert_eq!(RiskProfile::from_literacy(1.0), RiskProfile::High);
    assert_eq!(RiskProfile::from_literacy(2.0), RiskProfile::High);
    assert_eq!(RiskProfile::from_literacy(2.5), RiskProfile::Medium);
    assert_eq!(RiskProfile::from_literacy(3.0), RiskProfile::Medium);
    assert_eq!(RiskProfile::from_literacy(3.5), RiskProfile::Low);
    assert_eq!(RiskProfile::from_literacy(5.0), RiskProfile::Low);
}

#[test]
fn test_risk_profile_serde_lowercase() {
    let json = serde_json::to_string(&RiskProfile::Medium).unwrap();
    assert_eq!(json, "\"medium\"");

    let parsed: RiskProfile = serde_json::from_str("\"high\"").unwrap();
    assert_eq!(parsed, RiskProfile::High);
}

#[test]
fn test_cluster_for_literacy() {
    assert_eq!(User::cluster_for_literacy(1.0), 2);
    assert_eq!(User::cluster_for_literacy(4.0), 5);
    assert_eq!(User::cluster_for_literacy(5.0), 1);
    assert_eq!(User::cluster_for_literacy(3.7), 4);
}

#[test]
fn test_new_user_derives_risk_profile() {
    let user = NewUser::new(2.0, "51-65", "phishing").into_user(7);

    assert_eq!(user.user_id, 7);
    assert_eq!(user.risk_profile, RiskProfile::High);
    assert_eq!(user.user_cluster, 3);
    assert_eq!(user.preferred_topic, "phishing");
}

#[test]
fn test_new_user_keeps_explicit_risk_profile() {
    let user = NewUser::new(1.0, "18-25", "malware")
        .with_risk_profile(RiskProfile::Low)
        .into_user(1);

    assert_eq!(user.risk_profile, RiskProfile::Low);
}

#[test]
fn test_rating_validity() {
    assert!(Rating::new(1, 1, 1.0).is_valid());
    assert!(Rating::new(1, 1, 5.0).is_valid());
    assert!(Rating::new(1, 1, 3.4).is_valid());
    assert!(!Rating::new(1, 1, 0.9).is_valid());
    assert!(!Rating::new(1, 1, 5.1).is_valid());
    assert!(!Rating::new(1, 1, f32::NAN).is_valid());
}
