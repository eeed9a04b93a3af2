//! Store backend configuration.

use serde::{Deserialize, Serialize};

/// Which store implementation backs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; state is lost on restart.
    Memory,
    /// Turso database file.
    #[default]
    Turso,
}

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Store backend.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Database path, used by the turso backend.
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "./data/prism.db".to_string()
}
