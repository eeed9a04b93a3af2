//! Exposure Bounded Context
//!
//! Projected annual monetary loss per (process, risk) pair.
//!
//! # Key Concepts
//!
//! - **Base exposure**: criticality × vulnerability × (1 − resilience) × probability × 365
//! - **Cascading exposure**: share of an upstream exposure that reaches a
//!   dependent process, discounted by that process's resilience
//! - Monetary outputs are rounded to cents; totals are sums of rounded records

pub mod services;
pub mod value_objects;

pub use services::{ExposureAggregator, base_exposure, cascading_exposure};
pub use value_objects::{
    Assessment, CriticalityTier, Dependency, DomainExposure, ExposureBreakdown, ExposureRecord,
    ExposureSummary, Process, ProcessExposure,
};
