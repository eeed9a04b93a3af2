//! Live probability errors.

use thiserror::Error;

/// Errors raised while building signals.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// Multiplier outside `[0.5, 3.0]`.
    #[error("Signal multiplier {value} is outside [0.5, 3.0]")]
    MultiplierOutOfRange {
        /// Rejected value.
        value: f64,
    },
}
