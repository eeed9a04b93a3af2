//! HTTP response bodies that are not plain DTOs.

use serde::{Deserialize, Serialize};

use crate::application::dto::UpdateRunSummaryDto;

/// Capabilities advertised at the root endpoint.
pub const FEATURES: [&str; 5] = [
    "Live probability updates from external signal sources",
    "Complete audit trail for every update",
    "Signal aggregation and analysis",
    "13-risk catalog with cascading exposure analysis",
    "Real-time risk intelligence",
];

/// Root endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    /// Service name.
    pub name: String,
    /// Service version.
    pub version: String,
    /// Advertised capabilities.
    pub features: Vec<String>,
}

impl RootResponse {
    /// Build the root response for a version.
    #[must_use]
    pub fn new(version: &str) -> Self {
        Self {
            name: "PRISM Brain API".to_string(),
            version: version.to_string(),
            features: FEATURES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Sheets of the client assessment report, in report order.
pub const EXPORT_SHEETS: [(&str, &str); 5] = [
    ("Executive Summary", "Key metrics and findings"),
    ("Risk Register", "All risks with exposures"),
    ("Cascading Analysis", "Dependency impact chains"),
    ("Domain Breakdown", "Exposure by domain"),
    ("Process Breakdown", "Exposure by process"),
];

/// One sheet of the export template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSheet {
    /// Sheet title.
    pub sheet: String,
    /// What the sheet contains.
    pub contents: String,
}

/// Description of the assessment export template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportTemplateResponse {
    /// Human-readable message.
    pub message: String,
    /// Report sheets.
    pub template_structure: Vec<ExportSheet>,
}

impl Default for ExportTemplateResponse {
    fn default() -> Self {
        Self {
            message: "Client assessment export template".to_string(),
            template_structure: EXPORT_SHEETS
                .iter()
                .map(|(sheet, contents)| ExportSheet {
                    sheet: (*sheet).to_string(),
                    contents: (*contents).to_string(),
                })
                .collect(),
        }
    }
}

/// Response of a manually triggered probability update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityUpdateResponse {
    /// Always `completed` on success.
    pub status: String,
    /// Human-readable message.
    pub message: String,
    /// Run summary.
    pub result: UpdateRunSummaryDto,
}

impl From<UpdateRunSummaryDto> for ProbabilityUpdateResponse {
    fn from(result: UpdateRunSummaryDto) -> Self {
        Self {
            status: "completed".to_string(),
            message: "Probability update completed".to_string(),
            result,
        }
    }
}
