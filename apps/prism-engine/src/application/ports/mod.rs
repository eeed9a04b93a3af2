//! Application Ports (Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - [`StorePort`]: risk state, signal history, audit trail
//! - [`SignalSource`]: one external signal provider

mod signal_source_port;
mod store_port;

pub use signal_source_port::{SignalSource, SignalSourceError};
pub use store_port::{SIGNAL_RETENTION, StoreError, StorePort};
