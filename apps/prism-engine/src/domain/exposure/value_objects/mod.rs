//! Exposure value objects.

mod assessment;
mod exposure_record;
mod process;

pub use assessment::{Assessment, Dependency};
pub use exposure_record::{
    DomainExposure, ExposureBreakdown, ExposureRecord, ExposureSummary, ProcessExposure,
};
pub use process::{CriticalityTier, Process};
