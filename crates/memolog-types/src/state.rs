//! Persisted watcher state.
//!
//! A JSON side-channel (not the main database) tracking which files have
//! already been imported, keyed by file name with a content hash. Loaded at
//! process start and rewritten after every processed file so partial runs
//! are not lost.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content-hash ledger for the watched directory.
///
/// Keys are file names, not full paths -- the watched directory is flat.
/// Serialized with the historical camelCase field names
/// (`{"fileHashes": {...}, "lastRun": "..."}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatcherState {
    /// File name -> lowercase hex hash of the file content at last import.
    #[serde(default)]
    pub file_hashes: BTreeMap<String, String>,
    /// Timestamp of the most recent full scan.
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
}

impl WatcherState {
    /// True if the stored hash for `file_name` equals `hash`.
    ///
    /// A file with no stored hash is always considered changed.
    pub fn is_unchanged(&self, file_name: &str, hash: &str) -> bool {
        self.file_hashes.get(file_name).is_some_and(|h| h == hash)
    }

    /// Return a copy of this state with `file_name` recorded at `hash`.
    pub fn with_hash(&self, file_name: &str, hash: &str) -> Self {
        let mut next = self.clone();
        next.file_hashes
            .insert(file_name.to_string(), hash.to_string());
        next
    }

    /// Return a copy of this state with `last_run` set.
    pub fn with_last_run(&self, at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.last_run = Some(at);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_file_is_changed() {
        let state = WatcherState::default();
        assert!(!state.is_unchanged("fitness.md", "abc123"));
    }

    #[test]
    fn test_recorded_hash_is_unchanged() {
        let state = WatcherState::default().with_hash("fitness.md", "abc123");
        assert!(state.is_unchanged("fitness.md", "abc123"));
        assert!(!state.is_unchanged("fitness.md", "def456"));
        assert!(!state.is_unchanged("other.md", "abc123"));
    }

    #[test]
    fn test_with_hash_does_not_mutate_original() {
        let state = WatcherState::default();
        let _next = state.with_hash("a.md", "h1");
        assert!(state.file_hashes.is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let state = WatcherState::default().with_hash("2026-02-05.md", "deadbeef");
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("fileHashes").is_some());
        assert!(json.get("lastRun").is_some());
        assert_eq!(json["fileHashes"]["2026-02-05.md"], "deadbeef");
    }

    #[test]
    fn test_json_roundtrip() {
        let state = WatcherState::default()
            .with_hash("fitness.md", "aa")
            .with_last_run(Utc::now());
        let json = serde_json::to_string(&state).unwrap();
        let back: WatcherState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_deserialize_missing_fields_defaults() {
        let back: WatcherState = serde_json::from_str("{}").unwrap();
        assert!(back.file_hashes.is_empty());
        assert!(back.last_run.is_none());
    }
}
