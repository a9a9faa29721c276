//! Infrastructure layer for memolog.
//!
//! Contains implementations of the ports defined in `memolog-core`:
//! SQLite repositories, the JSON watcher-state store, SHA-256 hashing,
//! the debounced filesystem watcher, and the config loader.

pub mod config;
pub mod hash;
pub mod sqlite;
pub mod state_file;
pub mod watch;

use std::path::PathBuf;

/// Resolve the data directory: `MEMOLOG_DATA_DIR` env var, falling back to
/// `~/.memolog`, then to `.memolog` in the current directory.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MEMOLOG_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".memolog");
    }

    PathBuf::from(".memolog")
}
