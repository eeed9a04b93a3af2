//! Risk catalog errors.

use thiserror::Error;

use crate::domain::shared::{DomainError, RiskId};

/// Errors raised while building or querying the risk catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A risk with this ID was already added.
    #[error("Duplicate risk ID in catalog: {0}")]
    DuplicateRisk(RiskId),

    /// A risk definition violates an invariant.
    #[error("Invalid risk definition: {0}")]
    InvalidRisk(DomainError),
}
