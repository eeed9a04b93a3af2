//! External signals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::live_probability::errors::SignalError;
use crate::domain::shared::{RiskId, Timestamp};

/// Kind of observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    /// Advisory from an authority.
    Alert,
    /// Media mention.
    Mention,
    /// Observed event.
    Event,
    /// Longer-term trend.
    Trend,
}

/// Severity reported by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSeverity {
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
    /// Critical.
    Critical,
}

/// Factor applied to a baseline probability. Always within `[0.5, 3.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Multiplier(f64);

impl Multiplier {
    /// Smallest accepted factor.
    pub const MIN: f64 = 0.5;
    /// Largest accepted factor.
    pub const MAX: f64 = 3.0;

    /// Create a multiplier.
    ///
    /// # Errors
    ///
    /// Returns `SignalError::MultiplierOutOfRange` outside `[0.5, 3.0]` (NaN included).
    pub fn new(value: f64) -> Result<Self, SignalError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SignalError::MultiplierOutOfRange { value })
        }
    }

    /// Raw factor.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Multiplier {
    type Error = SignalError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Multiplier> for f64 {
    fn from(multiplier: Multiplier) -> Self {
        multiplier.0
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// An external observation used as evidence for a live probability.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    source: String,
    signal_type: SignalType,
    severity: SignalSeverity,
    multiplier: Multiplier,
    description: String,
    #[serde(default)]
    url: Option<String>,
    timestamp: Timestamp,
    #[serde(default)]
    risk_ids: Vec<RiskId>,
}

impl Signal {
    /// Create a signal observed now.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        signal_type: SignalType,
        severity: SignalSeverity,
        multiplier: Multiplier,
        description: impl Into<String>,
        risk_ids: Vec<RiskId>,
    ) -> Self {
        Self {
            source: source.into(),
            signal_type,
            severity,
            multiplier,
            description: description.into(),
            url: None,
            timestamp: Timestamp::now(),
            risk_ids,
        }
    }

    /// Attach a reference URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Override the observation time.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Source name.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Signal type.
    #[must_use]
    pub const fn signal_type(&self) -> SignalType {
        self.signal_type
    }

    /// Severity.
    #[must_use]
    pub const fn severity(&self) -> SignalSeverity {
        self.severity
    }

    /// Multiplier.
    #[must_use]
    pub const fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Reference URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Observation time.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Risks this signal affects.
    #[must_use]
    pub fn risk_ids(&self) -> &[RiskId] {
        &self.risk_ids
    }
}
