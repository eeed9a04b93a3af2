//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod calculate_exposure;
mod initialize_catalog;
mod query_risks;
mod update_probabilities;
mod validate_upload;

pub use calculate_exposure::{CalculateExposureUseCase, CalculationError};
pub use initialize_catalog::initialize_catalog;
pub use query_risks::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_SIGNAL_WINDOW_HOURS, QueryError, RiskQueryUseCase,
};
pub use update_probabilities::ProbabilityEngine;
pub use validate_upload::{REQUIRED_UPLOAD_FIELDS, UploadError, validate_client_upload};
