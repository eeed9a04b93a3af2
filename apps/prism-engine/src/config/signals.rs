//! Signal collection and update scheduling.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::signals::SIMULATED_SOURCE_NAMES;

/// Signal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalsConfig {
    /// Sources to poll, in polling order.
    #[serde(default = "default_enabled_sources")]
    pub enabled_sources: Vec<String>,
    /// Geography used in news queries.
    #[serde(default = "default_geography")]
    pub geography: String,
    /// Per-source collection timeout in seconds.
    #[serde(default = "default_source_timeout_secs")]
    pub source_timeout_secs: u64,
    /// Seconds between scheduled updates. 0 disables the scheduler.
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,
    /// Run one update as soon as the engine starts.
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            enabled_sources: default_enabled_sources(),
            geography: default_geography(),
            source_timeout_secs: default_source_timeout_secs(),
            update_interval_secs: default_update_interval_secs(),
            run_on_startup: true,
        }
    }
}

impl SignalsConfig {
    /// Per-source timeout.
    #[must_use]
    pub const fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    /// Scheduler period, if scheduling is enabled.
    #[must_use]
    pub const fn update_interval(&self) -> Option<Duration> {
        if self.update_interval_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.update_interval_secs))
        }
    }
}

fn default_enabled_sources() -> Vec<String> {
    SIMULATED_SOURCE_NAMES.iter().map(ToString::to_string).collect()
}

fn default_geography() -> String {
    "Global".to_string()
}

const fn default_source_timeout_secs() -> u64 {
    10
}

const fn default_update_interval_secs() -> u64 {
    3600
}

const fn default_true() -> bool {
    true
}
