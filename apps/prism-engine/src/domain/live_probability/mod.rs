//! Live Probability Bounded Context
//!
//! External signals adjust each risk's probability away from its baseline.
//!
//! # Key Concepts
//!
//! - **Signal**: immutable observation with a multiplier in `[0.5, 3.0]`
//! - **Probability update**: append-only audit record of one change
//! - **Recompute from baseline**: the live value is never compounded across runs

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::SignalError;
pub use services::{RiskSignals, build_update_reason, group_by_risk, recompute_from_baseline};
pub use value_objects::{Multiplier, ProbabilityUpdate, Signal, SignalSeverity, SignalType};
