//! Store Port (Driven Port)
//!
//! Owned state table for risks, plus the append-only signal history and
//! probability audit trail.

use async_trait::async_trait;

use crate::domain::live_probability::{ProbabilityUpdate, Signal};
use crate::domain::risk_catalog::Risk;
use crate::domain::shared::{RiskId, Timestamp, UpdateId};

/// Number of most recent signals a store keeps.
pub const SIGNAL_RETENTION: usize = 1000;

/// Store port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// No risk with this ID.
    #[error("Risk {0} not found")]
    RiskNotFound(RiskId),

    /// No audit record with this ID.
    #[error("Update record {0} not found")]
    UpdateNotFound(UpdateId),

    /// Record could not be encoded or decoded.
    #[error("Store serialization error: {message}")]
    Serialization {
        /// Error details.
        message: String,
    },

    /// Backend failure.
    #[error("Store backend error: {message}")]
    Backend {
        /// Error details.
        message: String,
    },
}

impl StoreError {
    /// Whether the error reports a missing entity.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RiskNotFound(_) | Self::UpdateNotFound(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Port for risk state, signal history and the audit trail.
///
/// A risk's live probability, `last_updated` and `update_count` are always
/// read and written together. [`StorePort::record_update`] makes the risk
/// write and its audit record visible atomically.
#[async_trait]
pub trait StorePort: Send + Sync {
    /// Get a risk by ID.
    async fn get_risk(&self, id: &RiskId) -> Result<Risk, StoreError>;

    /// All risks in catalog order.
    async fn list_risks(&self) -> Result<Vec<Risk>, StoreError>;

    /// Insert or fully replace a risk.
    async fn put_risk(&self, risk: &Risk) -> Result<(), StoreError>;

    /// Replace a risk and append its audit record as one unit.
    async fn record_update(
        &self,
        risk: &Risk,
        update: &ProbabilityUpdate,
    ) -> Result<(), StoreError>;

    /// Append signals to the history. No deduplication.
    async fn append_signals(&self, signals: &[Signal]) -> Result<(), StoreError>;

    /// Signals observed at or after `since`, oldest first.
    async fn list_recent_signals(&self, since: Timestamp) -> Result<Vec<Signal>, StoreError>;

    /// Audit records for a risk, newest first, at most `limit`.
    async fn list_update_history(
        &self,
        risk_id: &RiskId,
        limit: usize,
    ) -> Result<Vec<ProbabilityUpdate>, StoreError>;

    /// Get an audit record by ID.
    async fn get_update(&self, id: &UpdateId) -> Result<ProbabilityUpdate, StoreError>;

    /// Total number of audit records.
    async fn count_updates(&self) -> Result<usize, StoreError>;

    /// Total number of retained signals.
    async fn count_signals(&self) -> Result<usize, StoreError>;
}
