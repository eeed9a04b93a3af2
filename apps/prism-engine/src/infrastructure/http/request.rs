//! HTTP request query parameters.

use serde::{Deserialize, Serialize};

use crate::application::use_cases::{DEFAULT_HISTORY_LIMIT, DEFAULT_SIGNAL_WINDOW_HOURS};

/// Query parameters of the risk history endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of audit records.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Query parameters of the recent signals endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignalWindowQuery {
    /// Window length in hours.
    #[serde(default = "default_hours")]
    pub hours: u32,
}

impl Default for SignalWindowQuery {
    fn default() -> Self {
        Self {
            hours: DEFAULT_SIGNAL_WINDOW_HOURS,
        }
    }
}

const fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

const fn default_hours() -> u32 {
    DEFAULT_SIGNAL_WINDOW_HOURS
}
