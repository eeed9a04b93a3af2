//! Application Services
//!
//! Application services coordinate domain logic and infrastructure adapters.
//! They differ from use cases in that they hold no request state and are
//! shared by several use cases.

mod signal_collector;

pub use signal_collector::{DEFAULT_SOURCE_TIMEOUT, SignalCollector};
