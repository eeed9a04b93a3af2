//! Probability update audit record.

use serde::{Deserialize, Serialize};

use crate::domain::live_probability::value_objects::Signal;
use crate::domain::shared::{RiskId, Timestamp, UpdateId};

/// One change of a risk's live probability with its causes.
///
/// Append-only; a bad update is corrected by a newer one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityUpdate {
    id: UpdateId,
    risk_id: RiskId,
    timestamp: Timestamp,
    probability_before: f64,
    probability_after: f64,
    update_reason: String,
    signals: Vec<Signal>,
    data_sources_checked: Vec<String>,
    /// Confidence note. Signal-driven updates leave it empty.
    #[serde(default)]
    confidence_impact: Option<String>,
}

impl ProbabilityUpdate {
    /// Record a change with a fresh ID.
    #[must_use]
    pub fn record(
        risk_id: RiskId,
        timestamp: Timestamp,
        probability_before: f64,
        probability_after: f64,
        update_reason: String,
        signals: Vec<Signal>,
        data_sources_checked: Vec<String>,
    ) -> Self {
        Self {
            id: UpdateId::generate(),
            risk_id,
            timestamp,
            probability_before,
            probability_after,
            update_reason,
            signals,
            data_sources_checked,
            confidence_impact: None,
        }
    }

    /// Update ID.
    #[must_use]
    pub const fn id(&self) -> &UpdateId {
        &self.id
    }

    /// Updated risk.
    #[must_use]
    pub const fn risk_id(&self) -> &RiskId {
        &self.risk_id
    }

    /// When the update was applied.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Live probability before the update.
    #[must_use]
    pub const fn probability_before(&self) -> f64 {
        self.probability_before
    }

    /// Live probability after the update.
    #[must_use]
    pub const fn probability_after(&self) -> f64 {
        self.probability_after
    }

    /// `after − before`.
    #[must_use]
    pub fn change(&self) -> f64 {
        self.probability_after - self.probability_before
    }

    /// Human-readable reason.
    #[must_use]
    pub fn update_reason(&self) -> &str {
        &self.update_reason
    }

    /// Signals that caused the update, in grouping order.
    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Sources consulted during the run.
    #[must_use]
    pub fn data_sources_checked(&self) -> &[String] {
        &self.data_sources_checked
    }
}
