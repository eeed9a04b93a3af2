//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod identifiers;
mod rounding;
mod timestamp;

pub use identifiers::{ProcessId, RiskId, UpdateId};
pub use rounding::{CURRENCY_DP, round_dp, round_eur};
pub use timestamp::Timestamp;
