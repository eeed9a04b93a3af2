//! Signal Source Adapters

pub mod simulated;

pub use simulated::{
    SIMULATED_SOURCE_NAMES, SimulatedFeed, SimulatedSource, UnknownSourceError, build_sources,
};
