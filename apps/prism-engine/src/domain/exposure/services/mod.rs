//! Exposure domain services.

pub mod aggregator;
pub mod calculator;

pub use aggregator::ExposureAggregator;
pub use calculator::{DAYS_PER_YEAR, base_exposure, cascading_exposure};
