//! Exposure calculation DTOs

use serde::{Deserialize, Serialize};

use crate::domain::exposure::{
    Assessment, Dependency, DomainExposure, ExposureBreakdown, ExposureRecord, ExposureSummary,
    Process, ProcessExposure,
};
use crate::domain::shared::Timestamp;

/// Client assessment submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDataDto {
    /// Project reference.
    #[serde(default)]
    pub project_id: String,
    /// Client name.
    pub client_name: String,
    /// Industry.
    pub industry: String,
    /// Geography the client operates in.
    #[serde(default)]
    pub geography: String,
    /// Project start date as given by the client.
    #[serde(default)]
    pub project_start_date: String,
    /// Business processes.
    pub processes: Vec<Process>,
    /// Process-risk assessments.
    pub assessments: Vec<Assessment>,
    /// Process dependencies.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

const fn default_use_cascading() -> bool {
    true
}

/// Request to calculate exposure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequestDto {
    /// Client submission.
    pub client_data: ClientDataDto,
    /// Propagate exposure along dependencies.
    #[serde(default = "default_use_cascading")]
    pub use_cascading: bool,
}

/// Exposure calculation result with client metadata echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponseDto {
    /// Records, highest total first.
    pub exposures: Vec<ExposureRecord>,
    /// Totals.
    pub summary: ExposureSummary,
    /// Per-domain totals.
    pub by_domain: Vec<DomainExposure>,
    /// Per-process totals.
    pub by_process: Vec<ProcessExposure>,
    /// When the calculation ran.
    pub calculation_timestamp: Timestamp,
    /// Client name.
    pub client_name: String,
    /// Industry.
    pub industry: String,
    /// Geography.
    pub geography: String,
}

impl CalculationResponseDto {
    /// Combine a breakdown with the submission's metadata.
    #[must_use]
    pub fn from_breakdown(breakdown: ExposureBreakdown, client: &ClientDataDto) -> Self {
        Self {
            exposures: breakdown.exposures,
            summary: breakdown.summary,
            by_domain: breakdown.by_domain,
            by_process: breakdown.by_process,
            calculation_timestamp: Timestamp::now(),
            client_name: client.client_name.clone(),
            industry: client.industry.clone(),
            geography: client.geography.clone(),
        }
    }
}

/// Result of validating an uploaded client document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSummaryDto {
    /// Always `"success"`.
    pub status: String,
    /// Human-readable message.
    pub message: String,
    /// Client name from the document.
    pub client_name: String,
    /// Number of processes.
    pub processes_count: usize,
    /// Number of assessments.
    pub assessments_count: usize,
}
