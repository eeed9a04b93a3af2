//! Assessments and dependencies between processes.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ProcessId, RiskId};

/// How exposed and how prepared one process is for one risk.
///
/// Percentages are taken as given; no range check is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Assessed process.
    pub process_id: ProcessId,
    /// Catalog risk.
    pub risk_id: RiskId,
    /// Susceptibility, 0-100.
    pub vulnerability: f64,
    /// Ability to absorb the risk, 0-100.
    pub resilience: f64,
}

impl Assessment {
    /// Create an assessment.
    #[must_use]
    pub fn new(
        process_id: impl Into<ProcessId>,
        risk_id: impl Into<RiskId>,
        vulnerability: f64,
        resilience: f64,
    ) -> Self {
        Self {
            process_id: process_id.into(),
            risk_id: risk_id.into(),
            vulnerability,
            resilience,
        }
    }
}

/// Directed edge: a share of the upstream exposure propagates downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Process whose disruption propagates.
    pub upstream_process_id: ProcessId,
    /// Process that receives the propagated exposure.
    pub downstream_process_id: ProcessId,
    /// Fraction of upstream exposure that propagates, 0.0-1.0.
    pub dependency_strength: f64,
    /// Free-text note.
    #[serde(default)]
    pub description: String,
}

impl Dependency {
    /// Create a dependency edge.
    #[must_use]
    pub fn new(
        upstream: impl Into<ProcessId>,
        downstream: impl Into<ProcessId>,
        dependency_strength: f64,
    ) -> Self {
        Self {
            upstream_process_id: upstream.into(),
            downstream_process_id: downstream.into(),
            dependency_strength,
            description: String::new(),
        }
    }
}
