//! Prometheus metrics for the PRISM engine.
//!
//! Counters for signal collection and probability updates, plus latency
//! histograms for update runs and exposure calculations.
//!
//! # Example
//!
//! ```ignore
//! use prism_engine::observability::{init_metrics, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default())?;
//! record_signals_collected("CISA", 1);
//! ```

use std::net::{Ipv4Addr, SocketAddr};

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9090)),
            // 100us to 10s; update runs wait on external sources
            latency_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Signal Collection Metrics
// ============================================================================

/// Record signals returned by one source.
///
/// # Arguments
///
/// * `source` - Source name (e.g., "CISA", "GDELT")
/// * `count` - Number of signals returned
pub fn record_signals_collected(source: &str, count: usize) {
    counter!(
        "prism_signals_collected_total",
        "source" => source.to_string()
    )
    .increment(count as u64);
}

/// Record a failed or timed-out source.
///
/// # Arguments
///
/// * `source` - Source name
/// * `reason` - Failure class (e.g., "timeout", "unavailable")
pub fn record_signal_source_failure(source: &str, reason: &str) {
    counter!(
        "prism_signal_source_failures_total",
        "source" => source.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}

// ============================================================================
// Probability Engine Metrics
// ============================================================================

/// Record one live-probability write.
///
/// # Arguments
///
/// * `domain` - Risk domain of the updated risk
pub fn record_probability_update(domain: &str) {
    counter!(
        "prism_probability_updates_total",
        "domain" => domain.to_string()
    )
    .increment(1);
}

/// Record a completed update run.
pub fn record_update_run(latency_seconds: f64) {
    histogram!("prism_update_run_seconds").record(latency_seconds);
}

// ============================================================================
// Exposure Metrics
// ============================================================================

/// Record an exposure calculation.
///
/// # Arguments
///
/// * `cascading` - Whether dependency propagation was enabled
/// * `latency_seconds` - Calculation time in seconds
pub fn record_exposure_calculation(cascading: bool, latency_seconds: f64) {
    counter!(
        "prism_exposure_calculations_total",
        "cascading" => cascading.to_string()
    )
    .increment(1);

    histogram!("prism_exposure_calculation_seconds").record(latency_seconds);
}
