//! Live probability domain services.

pub mod probability_model;

pub use probability_model::{
    RiskSignals, build_update_reason, group_by_risk, recompute_from_baseline,
};
