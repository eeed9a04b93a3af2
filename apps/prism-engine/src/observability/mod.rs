//! Observability module for metrics and logging.
//!
//! This module provides instrumentation for the PRISM engine,
//! including Prometheus metrics export and structured logs.

mod logging;
mod metrics;

pub use logging::{LogFormat, init_logging};
pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_exposure_calculation,
    record_probability_update, record_signal_source_failure, record_signals_collected,
    record_update_run,
};
