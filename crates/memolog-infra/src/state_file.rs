//! JSON watcher-state store.
//!
//! Implements the `StateStore` trait from `memolog-core` with a single JSON
//! document on disk. A missing file loads as the default (empty) state; a
//! malformed file is an error rather than silently starting over, since
//! losing the hash ledger would reimport every file.
//!
//! Saves go through a temp file in the same directory followed by a rename,
//! so a crash mid-write never leaves a truncated state file. No locking:
//! a second concurrent run would clobber this file, an acknowledged
//! limitation of a single-operator tool.

use std::path::PathBuf;

use memolog_core::state_store::StateStore;
use memolog_types::error::StateError;
use memolog_types::state::WatcherState;

/// File-backed implementation of `StateStore`.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    /// Create a store persisting to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The on-disk location of the state document.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StateStore for JsonStateStore {
    async fn load(&self) -> Result<WatcherState, StateError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "no state file found, starting with empty state"
                );
                return Ok(WatcherState::default());
            }
            Err(err) => return Err(StateError::Read(err.to_string())),
        };

        serde_json::from_str(&content).map_err(|err| StateError::Invalid(err.to_string()))
    }

    async fn save(&self, state: &WatcherState) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|err| StateError::Write(err.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StateError::Write(err.to_string()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|err| StateError::Write(err.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| StateError::Write(err.to_string()))?;

        Ok(())
    }
}
