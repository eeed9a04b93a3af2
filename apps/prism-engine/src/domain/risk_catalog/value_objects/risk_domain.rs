//! Risk domain classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level family a catalog risk belongs to.
///
/// The first character of a risk ID encodes its domain (`P1.1`, `S2.1`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskDomain {
    /// Energy, materials, climate.
    Physical,
    /// Trade policy, regulation, carbon pricing.
    Structural,
    /// Cyber and IT availability.
    Digital,
    /// Logistics, labor, suppliers.
    Operational,
}

impl RiskDomain {
    /// All domains in catalog order.
    pub const ALL: [Self; 4] = [
        Self::Physical,
        Self::Structural,
        Self::Digital,
        Self::Operational,
    ];

    /// Display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Structural => "Structural",
            Self::Digital => "Digital",
            Self::Operational => "Operational",
        }
    }

    /// Parse a domain name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for RiskDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
