use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RATING, MIN_RATING};

pub type UserId = u32;
pub type ModuleId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Coarse susceptibility bucket attached to a learner.
pub enum RiskProfile {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskProfile {
    /// Default profile for a learner who did not state one.
    ///
    /// Literacy `<= 2` is high risk, `<= 3` medium, anything above low.
    pub fn from_literacy(literacy: f32) -> Self {
        if literacy <= 2.0 {
            RiskProfile::High
        } else if literacy <= 3.0 {
            RiskProfile::Medium
        } else {
            RiskProfile::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskProfile::Low => "low",
            RiskProfile::Medium => "medium",
            RiskProfile::High => "high",
        }
    }
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A registered learner.
pub struct User {
    pub user_id: UserId,
    /// Learner segment assigned at registration.
    pub user_cluster: i32,
    /// Self-reported digital literacy, 1 (novice) to 5 (expert). Treated as continuous.
    pub digital_literacy: f32,
    pub age_group: String,
    pub risk_profile: RiskProfile,
    /// Scam category the learner most wants to study.
    pub preferred_topic: String,
}

impl User {
    /// Cluster assigned to a newly registered learner: `(literacy % 5) + 1`.
    pub fn cluster_for_literacy(literacy: f32) -> i32 {
        (literacy as i32 % 5) + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Registration request; the id, cluster and (optionally) risk profile are assigned.
pub struct NewUser {
    pub digital_literacy: f32,
    pub age_group: String,
    pub preferred_topic: String,
    #[serde(default)]
    pub risk_profile: Option<RiskProfile>,
}

impl NewUser {
    pub fn new(
        digital_literacy: f32,
        age_group: impl Into<String>,
        preferred_topic: impl Into<String>,
    ) -> Self {
        Self {
            digital_literacy,
            age_group: age_group.into(),
            preferred_topic: preferred_topic.into(),
            risk_profile: None,
        }
    }

    pub fn with_risk_profile(mut self, risk_profile: RiskProfile) -> Self {
        self.risk_profile = Some(risk_profile);
        self
    }

    /// Builds the stored record under `user_id`.
    pub fn into_user(self, user_id: UserId) -> User {
        let risk_profile = self
            .risk_profile
            .unwrap_or_else(|| RiskProfile::from_literacy(self.digital_literacy));

        User {
            user_id,
            user_cluster: User::cluster_for_literacy(self.digital_literacy),
            digital_literacy: self.digital_literacy,
            age_group: self.age_group,
            risk_profile,
            preferred_topic: self.preferred_topic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A training module from the static catalog.
pub struct Module {
    pub module_id: ModuleId,
    /// Scam category the module teaches; compared against [`User::preferred_topic`].
    pub scam_type: String,
    /// 1 (introductory) to 5 (advanced).
    pub difficulty: f32,
    /// Literacy level the module is written for, 1 to 5.
    pub target_literacy: f32,
    pub duration_min: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// One entry of the append-only rating log. Pairs may repeat.
pub struct Rating {
    pub user_id: UserId,
    pub module_id: ModuleId,
    pub rating: f32,
}

impl Rating {
    pub fn new(user_id: UserId, module_id: ModuleId, rating: f32) -> Self {
        Self {
            user_id,
            module_id,
            rating,
        }
    }

    /// Returns `true` if the value is on the rating scale.
    pub fn is_valid(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating)
    }
}
