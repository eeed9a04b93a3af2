//! Risk DTOs

use serde::{Deserialize, Serialize};

use crate::domain::live_probability::{ProbabilityUpdate, Signal};
use crate::domain::risk_catalog::{ConfidenceLevel, DomainStatistics, Risk, RiskDomain};
use crate::domain::shared::{RiskId, Timestamp};

/// DTO for a risk with its live state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveRiskDto {
    /// Risk ID.
    pub id: RiskId,
    /// Name.
    pub name: String,
    /// Domain.
    pub domain: RiskDomain,
    /// Description.
    pub description: String,
    /// Baseline probability.
    pub probability_baseline: f64,
    /// Live probability.
    pub probability_live: f64,
    /// `live − baseline`.
    pub change_from_baseline: f64,
    /// Relative change in percent, 0 when the baseline is 0.
    pub change_percent: f64,
    /// Confidence level.
    pub confidence_level: ConfidenceLevel,
    /// Last live-probability write.
    pub last_updated: Timestamp,
    /// Number of live-probability writes.
    pub update_count: u64,
    /// Provenance.
    pub sources: Vec<String>,
}

impl From<&Risk> for LiveRiskDto {
    fn from(risk: &Risk) -> Self {
        Self {
            id: risk.id().clone(),
            name: risk.name().to_string(),
            domain: risk.domain(),
            description: risk.description().to_string(),
            probability_baseline: risk.probability_baseline(),
            probability_live: risk.probability_live(),
            change_from_baseline: risk.change_from_baseline(),
            change_percent: risk.change_percent(),
            confidence_level: risk.confidence_level(),
            last_updated: risk.last_updated(),
            update_count: risk.update_count(),
            sources: risk.sources().to_vec(),
        }
    }
}

/// Live risk listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskListDto {
    /// Risks, highest live probability first.
    pub risks: Vec<LiveRiskDto>,
    /// Number of risks.
    pub total_count: usize,
    /// When the listing was produced.
    pub timestamp: Timestamp,
}

/// Audit history of one risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskHistoryDto {
    /// Risk ID.
    pub risk_id: RiskId,
    /// Risk name.
    pub risk_name: String,
    /// Updates, newest first.
    pub updates: Vec<ProbabilityUpdate>,
    /// Number of updates returned.
    pub total_updates: usize,
}

/// Signals from one source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSignalsDto {
    /// Source name.
    pub source: String,
    /// Signals from this source, oldest first.
    pub signals: Vec<Signal>,
}

/// Signals observed in a recent window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSignalsDto {
    /// All signals, oldest first.
    pub signals: Vec<Signal>,
    /// Number of signals.
    pub total_count: usize,
    /// Signals grouped by source, in order of first appearance.
    pub by_source: Vec<SourceSignalsDto>,
    /// Window length.
    pub time_range_hours: u32,
}

/// Domain statistics listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainsDto {
    /// One entry per domain.
    pub domains: Vec<DomainStatistics>,
}

/// Status of one configured signal source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceDto {
    /// Source name.
    pub name: String,
    /// `"ready"` for every configured source.
    pub status: String,
    /// Signals retained from this source in the last 24 hours.
    pub recent_signals: usize,
}

/// Data source listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourcesDto {
    /// Sources in configuration order.
    pub sources: Vec<DataSourceDto>,
}

/// Engine health snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    /// `"healthy"`.
    pub status: String,
    /// When the snapshot was taken.
    pub timestamp: Timestamp,
    /// Risks in the store.
    pub risks_loaded: usize,
    /// Audit records in the store.
    pub total_updates: usize,
    /// Retained signals.
    pub total_signals: usize,
    /// Engine version.
    pub version: String,
}
