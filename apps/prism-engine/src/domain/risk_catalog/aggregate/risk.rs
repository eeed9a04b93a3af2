//! Risk Aggregate

use serde::{Deserialize, Serialize};

use crate::domain::risk_catalog::value_objects::{ConfidenceLevel, RiskDomain};
use crate::domain::shared::{DomainError, RiskId, Timestamp};

/// Lower bound of a probability, in percent.
pub const PROBABILITY_MIN: f64 = 0.0;
/// Upper bound of a probability, in percent.
pub const PROBABILITY_MAX: f64 = 100.0;

/// Clamp a probability to `[0, 100]`.
#[must_use]
pub fn clamp_probability(probability: f64) -> f64 {
    probability.clamp(PROBABILITY_MIN, PROBABILITY_MAX)
}

/// Risk Aggregate - one entry of the risk catalog with its live probability.
///
/// `probability_live`, `last_updated` and `update_count` only ever change
/// together, through [`Risk::apply_live_probability`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredRisk")]
pub struct Risk {
    /// Stable domain-coded ID.
    id: RiskId,
    /// Short name.
    name: String,
    /// Domain.
    domain: RiskDomain,
    /// Longer description.
    description: String,
    /// Baseline annual probability (percent).
    probability_baseline: f64,
    /// Live annual probability (percent).
    probability_live: f64,
    /// Confidence in the estimate.
    #[serde(default)]
    confidence_level: ConfidenceLevel,
    /// Time of the last live-probability write.
    last_updated: Timestamp,
    /// Number of live-probability writes.
    #[serde(default)]
    update_count: u64,
    /// Provenance of the baseline, in citation order.
    #[serde(default)]
    sources: Vec<String>,
}

impl Risk {
    /// Create a catalog risk whose live probability starts at the baseline.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the baseline is outside `[0, 100]`
    /// or the ID is empty.
    pub fn new(
        id: impl Into<RiskId>,
        name: impl Into<String>,
        domain: RiskDomain,
        description: impl Into<String>,
        probability_baseline: f64,
        confidence_level: ConfidenceLevel,
        sources: Vec<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(DomainError::invalid("id", "risk ID must not be empty"));
        }
        if !(PROBABILITY_MIN..=PROBABILITY_MAX).contains(&probability_baseline) {
            return Err(DomainError::invalid(
                "probability_baseline",
                format!("{probability_baseline} is outside [0, 100]"),
            ));
        }

        Ok(Self {
            id,
            name: name.into(),
            domain,
            description: description.into(),
            probability_baseline,
            probability_live: probability_baseline,
            confidence_level,
            last_updated: Timestamp::now(),
            update_count: 0,
            sources,
        })
    }

    /// Get the risk ID.
    #[must_use]
    pub const fn id(&self) -> &RiskId {
        &self.id
    }

    /// Get the risk name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the domain.
    #[must_use]
    pub const fn domain(&self) -> RiskDomain {
        self.domain
    }

    /// Get the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Baseline probability (percent).
    #[must_use]
    pub const fn probability_baseline(&self) -> f64 {
        self.probability_baseline
    }

    /// Live probability (percent). This is the probability used for exposure.
    #[must_use]
    pub const fn probability_live(&self) -> f64 {
        self.probability_live
    }

    /// Confidence level.
    #[must_use]
    pub const fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    /// Time of the last live-probability write.
    #[must_use]
    pub const fn last_updated(&self) -> Timestamp {
        self.last_updated
    }

    /// Number of live-probability writes so far.
    #[must_use]
    pub const fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Provenance strings.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Live minus baseline, in percentage points.
    #[must_use]
    pub fn change_from_baseline(&self) -> f64 {
        self.probability_live - self.probability_baseline
    }

    /// Relative change from baseline in percent; 0 when the baseline is 0.
    #[must_use]
    pub fn change_percent(&self) -> f64 {
        if self.probability_baseline > 0.0 {
            self.change_from_baseline() / self.probability_baseline * 100.0
        } else {
            0.0
        }
    }

    /// Write a new live probability, clamped to `[0, 100]`.
    ///
    /// Returns the clamped value that was stored.
    pub fn apply_live_probability(&mut self, probability: f64, at: Timestamp) -> f64 {
        let clamped = clamp_probability(probability);
        self.probability_live = clamped;
        self.last_updated = at;
        self.update_count += 1;
        clamped
    }
}

/// Serialized form of [`Risk`]. Deserialization goes through
/// [`Risk::new`] so stored rows obey the same invariants.
#[derive(Deserialize)]
struct StoredRisk {
    id: RiskId,
    name: String,
    domain: RiskDomain,
    description: String,
    probability_baseline: f64,
    probability_live: f64,
    #[serde(default)]
    confidence_level: ConfidenceLevel,
    last_updated: Timestamp,
    #[serde(default)]
    update_count: u64,
    #[serde(default)]
    sources: Vec<String>,
}

impl TryFrom<StoredRisk> for Risk {
    type Error = DomainError;

    fn try_from(stored: StoredRisk) -> Result<Self, Self::Error> {
        let mut risk = Self::new(
            stored.id,
            stored.name,
            stored.domain,
            stored.description,
            stored.probability_baseline,
            stored.confidence_level,
            stored.sources,
        )?;
        risk.probability_live = clamp_probability(stored.probability_live);
        risk.last_updated = stored.last_updated;
        risk.update_count = stored.update_count;
        Ok(risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ransomware() -> Risk {
        Risk::new(
            "D1.1",
            "Ransomware targeting ICS/SCADA systems",
            RiskDomain::Digital,
            "Manufacturing disruption, safety systems compromise",
            55.0,
            ConfidenceLevel::High,
            vec!["CISA".to_string(), "Dragos".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn new_risk_starts_at_baseline() {
        let risk = ransomware();
        assert_eq!(risk.probability_live(), 55.0);
        assert_eq!(risk.update_count(), 0);
        assert_eq!(risk.change_from_baseline(), 0.0);
    }

    #[test]
    fn new_rejects_out_of_range_baseline() {
        let result = Risk::new(
            "X1.1",
            "bad",
            RiskDomain::Physical,
            "",
            120.0,
            ConfidenceLevel::Low,
            vec![],
        );
        assert!(matches!(result, Err(DomainError::InvalidValue { .. })));
    }

    #[test]
    fn new_rejects_empty_id() {
        let result = Risk::new(
            " ",
            "bad",
            RiskDomain::Physical,
            "",
            10.0,
            ConfidenceLevel::Low,
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn apply_live_probability_moves_all_three_fields() {
        let mut risk = ransomware();
        let at = Timestamp::parse("2026-02-01T08:00:00Z").unwrap();

        let stored = risk.apply_live_probability(63.25, at);

        assert_eq!(stored, 63.25);
        assert_eq!(risk.probability_live(), 63.25);
        assert_eq!(risk.last_updated(), at);
        assert_eq!(risk.update_count(), 1);
    }

    #[test]
    fn apply_live_probability_clamps() {
        let mut risk = ransomware();
        assert_eq!(risk.apply_live_probability(250.0, Timestamp::now()), 100.0);
        assert_eq!(risk.apply_live_probability(-3.0, Timestamp::now()), 0.0);
        assert_eq!(risk.update_count(), 2);
    }

    #[test]
    fn change_percent_is_zero_for_zero_baseline() {
        let mut risk = Risk::new(
            "O9.9",
            "dormant",
            RiskDomain::Operational,
            "",
            0.0,
            ConfidenceLevel::Low,
            vec![],
        )
        .unwrap();
        risk.apply_live_probability(5.0, Timestamp::now());

        assert_eq!(risk.change_from_baseline(), 5.0);
        assert_eq!(risk.change_percent(), 0.0);
    }

    #[test]
    fn change_percent_relative_to_baseline() {
        let mut risk = ransomware();
        risk.apply_live_probability(66.0, Timestamp::now());
        assert!((risk.change_percent() - 20.0).abs() < 1e-9);
    }

    fn stored_json(probability_baseline: f64, probability_live: f64) -> serde_json::Value {
        let mut value = serde_json::to_value(ransomware()).unwrap();
        value["probability_baseline"] = probability_baseline.into();
        value["probability_live"] = probability_live.into();
        value["update_count"] = 7.into();
        value
    }

    #[test]
    fn serde_roundtrip_keeps_live_state() {
        let mut risk = ransomware();
        risk.apply_live_probability(63.25, Timestamp::now());

        let json = serde_json::to_string(&risk).unwrap();
        let parsed: Risk = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, risk);
    }

    #[test]
    fn deserialize_clamps_stored_live_probability() {
        let risk: Risk = serde_json::from_value(stored_json(55.0, 140.0)).unwrap();
        assert_eq!(risk.probability_live(), 100.0);
        assert_eq!(risk.update_count(), 7);

        let risk: Risk = serde_json::from_value(stored_json(55.0, -4.0)).unwrap();
        assert_eq!(risk.probability_live(), 0.0);
    }

    #[test]
    fn deserialize_rejects_out_of_range_baseline() {
        let result = serde_json::from_value::<Risk>(stored_json(130.0, 50.0));
        assert!(result.is_err());
    }
}
