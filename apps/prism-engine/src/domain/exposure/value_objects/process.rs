//! Business process submitted by a client.

use serde::{Deserialize, Serialize};

use crate::domain::shared::ProcessId;

/// Business importance bucket of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CriticalityTier {
    /// Stops the business.
    Critical,
    /// Severe degradation.
    #[serde(rename = "Very Important")]
    VeryImportant,
    /// Noticeable degradation.
    Important,
    /// Default tier.
    #[default]
    Neutral,
    /// Little impact.
    Minor,
    /// Not rated.
    #[serde(rename = "Not Applicable")]
    NotApplicable,
}

/// A business process with its daily criticality.
///
/// Immutable for the duration of one calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Process ID (unique within a submission).
    pub id: ProcessId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-form grouping, e.g. "Production".
    #[serde(default)]
    pub category: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Criticality tier.
    #[serde(default)]
    pub criticality_tier: CriticalityTier,
    /// Loss per day of disruption, EUR.
    pub criticality_eur_per_day: f64,
}

impl Process {
    /// Create a process with only the fields the calculation needs.
    #[must_use]
    pub fn new(id: impl Into<ProcessId>, name: impl Into<String>, criticality_eur_per_day: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            description: String::new(),
            criticality_tier: CriticalityTier::default(),
            criticality_eur_per_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tier_display_names() {
        let json = r#"{
            "id": "proc-1",
            "name": "Final assembly",
            "category": "Production",
            "description": "Line 3",
            "criticality_tier": "Very Important",
            "criticality_eur_per_day": 100000.0
        }"#;
        let process: Process = serde_json::from_str(json).unwrap();
        assert_eq!(process.criticality_tier, CriticalityTier::VeryImportant);
        assert_eq!(process.criticality_eur_per_day, 100_000.0);
    }

    #[test]
    fn optional_fields_default() {
        let process: Process =
            serde_json::from_str(r#"{"id": "p", "criticality_eur_per_day": 10}"#).unwrap();
        assert_eq!(process.criticality_tier, CriticalityTier::Neutral);
        assert!(process.name.is_empty());
    }

    #[test]
    fn missing_criticality_is_rejected() {
        let result: Result<Process, _> = serde_json::from_str(r#"{"id": "p"}"#);
        assert!(result.is_err());
    }
}
