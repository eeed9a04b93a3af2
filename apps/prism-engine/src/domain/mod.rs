//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic
//!
//! # Bounded Contexts
//!
//! - [`risk_catalog`]: Seeded risks with baseline and live probabilities
//! - [`exposure`]: Annual loss per process and risk, with cascading
//! - [`live_probability`]: Signals, the multiplicative model and audit records

pub mod exposure;
pub mod live_probability;
pub mod risk_catalog;
pub mod shared;
