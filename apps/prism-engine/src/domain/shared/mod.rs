//! Shared Domain Types
//!
//! Value objects and errors shared across bounded contexts.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{
    CURRENCY_DP, ProcessId, RiskId, Timestamp, UpdateId, round_dp, round_eur,
};
