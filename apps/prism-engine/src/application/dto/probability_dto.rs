//! Probability update DTOs

use serde::{Deserialize, Serialize};

use crate::domain::shared::{RiskId, Timestamp};

/// Before/after view of one updated risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskUpdateDto {
    /// Risk ID.
    pub risk_id: RiskId,
    /// Risk name.
    pub risk_name: String,
    /// Live probability before.
    pub probability_before: f64,
    /// Live probability after.
    pub probability_after: f64,
    /// `after − before`.
    pub change: f64,
    /// Number of contributing signals.
    pub signals_count: usize,
}

/// Outcome of one update run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRunSummaryDto {
    /// When the run finished.
    pub timestamp: Timestamp,
    /// Signals returned by all sources.
    pub signals_collected: usize,
    /// Risks whose live probability was written.
    pub risks_updated: usize,
    /// Sources consulted, in configuration order.
    pub sources_checked: Vec<String>,
    /// Per-risk changes, in grouping order.
    pub updates: Vec<RiskUpdateDto>,
}
