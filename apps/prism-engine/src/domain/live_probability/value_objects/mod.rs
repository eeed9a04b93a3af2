//! Live probability value objects.

mod probability_update;
mod signal;

pub use probability_update::ProbabilityUpdate;
pub use signal::{Multiplier, Signal, SignalSeverity, SignalType};
