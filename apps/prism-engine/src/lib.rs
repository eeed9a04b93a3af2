// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! PRISM Engine - Risk Exposure Core
//!
//! Projects the annual financial exposure of client business processes to a
//! catalog of external risks, and keeps each risk's probability live from
//! external signals with a full audit trail.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic, no I/O
//!   - `risk_catalog`: Risk aggregate, seed catalog, domain statistics
//!   - `exposure`: Base/cascading exposure formulas and aggregation
//!   - `live_probability`: Signals, audit records, multiplicative model
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `StorePort`, `SignalSource`
//!   - `services`: `SignalCollector`
//!   - `use_cases`: `ProbabilityEngine`, `CalculateExposure`, queries, upload validation
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: In-memory and Turso stores
//!   - `signals`: Simulated signal feeds
//!   - `http`: Axum REST API
//!   - `scheduler`: Periodic probability updates

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Error codes and HTTP error mapping.
pub mod error;

/// Logging and Prometheus metrics.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::exposure::{
    ExposureAggregator, ExposureBreakdown, ExposureRecord, base_exposure, cascading_exposure,
};
pub use domain::live_probability::{ProbabilityUpdate, Signal};
pub use domain::risk_catalog::{Risk, RiskCatalog, RiskDomain, seed_risks};
pub use domain::shared::{ProcessId, RiskId, Timestamp, UpdateId};

// Application re-exports
pub use application::ports::{SignalSource, StoreError, StorePort};
pub use application::services::SignalCollector;
pub use application::use_cases::{CalculateExposureUseCase, ProbabilityEngine, RiskQueryUseCase};

// Infrastructure re-exports
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{InMemoryStore, TursoStore};

pub use error::{EngineError, ErrorCode};
