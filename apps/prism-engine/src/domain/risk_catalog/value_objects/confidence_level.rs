//! Confidence in a risk's probability estimate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative confidence in a probability estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// Sparse or anecdotal sources.
    Low,
    /// Default level.
    #[default]
    Medium,
    /// Multiple authoritative sources.
    High,
}

impl ConfidenceLevel {
    /// Display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parse a level name; unknown names map to the default.
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
