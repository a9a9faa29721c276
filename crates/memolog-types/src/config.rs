//! Global configuration shape.
//!
//! Deserialized from `{data_dir}/config.toml` by the infra loader. Every
//! field has a default so a missing or partial file still yields a usable
//! configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default debounce window for the continuous file watch, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Top-level configuration for the memolog importer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Directory of markdown journal files to watch. Defaults to
    /// `{data_dir}/notes` when unset.
    #[serde(default)]
    pub watch_dir: Option<PathBuf>,

    /// Override for the SQLite database URL. Defaults to
    /// `sqlite://{data_dir}/memolog.db`.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Debounce window for coalescing rapid successive writes before the
    /// importer is notified.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            watch_dir: None,
            database_url: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert!(config.watch_dir.is_none());
        assert!(config.database_url.is_none());
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: GlobalConfig = serde_json::from_str(r#"{"watch_dir": "/notes"}"#).unwrap();
        assert_eq!(config.watch_dir, Some(PathBuf::from("/notes")));
        assert_eq!(config.debounce_ms, 500);
    }
}
