//! Risk Catalog Bounded Context
//!
//! The table of external risks an organization's processes are assessed
//! against.
//!
//! # Key Concepts
//!
//! - **Baseline probability**: annual probability from the seed set, never changes
//! - **Live probability**: baseline perturbed by external signals, clamped to `[0, 100]`
//! - **Domain**: Physical, Structural, Digital or Operational

pub mod aggregate;
pub mod catalog;
pub mod errors;
pub mod seed;
pub mod value_objects;

pub use aggregate::{Risk, clamp_probability};
pub use catalog::{DomainRiskSummary, DomainStatistics, RiskCatalog};
pub use errors::CatalogError;
pub use seed::seed_risks;
pub use value_objects::{ConfidenceLevel, RiskDomain};
