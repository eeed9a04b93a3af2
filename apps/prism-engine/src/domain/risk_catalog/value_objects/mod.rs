//! Risk Catalog Value Objects

mod confidence_level;
mod risk_domain;

pub use confidence_level::ConfidenceLevel;
pub use risk_domain::RiskDomain;
