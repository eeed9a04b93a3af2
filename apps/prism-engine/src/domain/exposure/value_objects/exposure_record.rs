//! Exposure calculation outputs.

use serde::{Deserialize, Serialize};

use crate::domain::risk_catalog::{ConfidenceLevel, RiskDomain};
use crate::domain::shared::{ProcessId, RiskId};

/// Exposure of one process to one risk. Currency fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureRecord {
    /// Risk ID.
    pub risk_id: RiskId,
    /// Risk name.
    pub risk_name: String,
    /// Risk domain.
    pub domain: RiskDomain,
    /// Process ID.
    pub process_id: ProcessId,
    /// Process name.
    pub process_name: String,
    /// Process criticality, EUR per day.
    pub criticality: f64,
    /// Vulnerability percentage used.
    pub vulnerability: f64,
    /// Resilience percentage used.
    pub resilience: f64,
    /// Risk probability used (percent).
    pub probability: f64,
    /// Annual base exposure, EUR.
    pub base_exposure_eur: f64,
    /// Annual exposure propagated to downstream processes, EUR.
    pub cascading_exposure_eur: f64,
    /// Base plus cascading, EUR.
    pub total_exposure_eur: f64,
    /// Confidence of the risk estimate.
    pub confidence_level: ConfidenceLevel,
}

/// Totals across all exposure records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExposureSummary {
    /// Sum of base exposures, EUR.
    pub total_base_exposure: f64,
    /// Sum of cascading exposures, EUR.
    pub total_cascading_exposure: f64,
    /// Sum of total exposures, EUR.
    pub total_overall_exposure: f64,
    /// Number of records.
    pub total_risks_assessed: usize,
    /// Cascading share of the overall total, percent. Zero when the total is zero.
    pub cascading_percentage: f64,
}

/// Exposure grouped by risk domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainExposure {
    /// Domain.
    pub domain: RiskDomain,
    /// Sum of record totals, EUR.
    pub total_exposure: f64,
    /// Number of records.
    pub risk_count: usize,
}

/// Exposure grouped by process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessExposure {
    /// Process ID.
    pub process_id: ProcessId,
    /// Process name.
    pub process_name: String,
    /// Sum of record totals, EUR.
    pub total_exposure: f64,
    /// Number of records.
    pub risk_count: usize,
}

/// Full aggregation result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExposureBreakdown {
    /// Records, highest total first.
    pub exposures: Vec<ExposureRecord>,
    /// Totals.
    pub summary: ExposureSummary,
    /// Per-domain totals in order of first appearance.
    pub by_domain: Vec<DomainExposure>,
    /// Per-process totals in order of first appearance.
    pub by_process: Vec<ProcessExposure>,
}
