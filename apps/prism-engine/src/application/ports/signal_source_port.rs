//! Signal Source Port (Driven Port)
//!
//! Interface for one external provider of risk signals.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::live_probability::Signal;

/// Signal source error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignalSourceError {
    /// Provider could not be reached.
    #[error("Signal source {source_name} unavailable: {message}")]
    Unavailable {
        /// Source name.
        source_name: String,
        /// Error details.
        message: String,
    },

    /// Provider did not answer in time.
    #[error("Signal source {source_name} timed out after {timeout:?}")]
    Timeout {
        /// Source name.
        source_name: String,
        /// Configured timeout.
        timeout: Duration,
    },

    /// Provider answered with something unusable.
    #[error("Signal source {source_name} returned an invalid payload: {message}")]
    InvalidPayload {
        /// Source name.
        source_name: String,
        /// Error details.
        message: String,
    },
}

impl SignalSourceError {
    /// Short label for metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "unavailable",
            Self::Timeout { .. } => "timeout",
            Self::InvalidPayload { .. } => "invalid_payload",
        }
    }
}

/// Port for an external signal provider.
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Stable source name, used in audit records.
    fn name(&self) -> &str;

    /// Fetch the current signals.
    async fn collect(&self) -> Result<Vec<Signal>, SignalSourceError>;
}
