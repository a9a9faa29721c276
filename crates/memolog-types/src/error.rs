use thiserror::Error;

/// Errors from repository operations (used by trait definitions in memolog-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the watcher-state store.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state file: {0}")]
    Read(String),

    #[error("failed to write state file: {0}")]
    Write(String),

    #[error("invalid state file: {0}")]
    Invalid(String),
}

/// Errors surfaced while importing a single journal file.
///
/// Parse-level problems (unparseable dates, implausible values, incomplete
/// macro lines) never reach this type -- those candidates are silently
/// dropped by the extractors. Only persistence failures are fatal for a file.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("state store error: {0}")]
    State(#[from] StateError),
}

/// Errors that can occur while setting up the filesystem watch.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("watcher creation failed: {0}")]
    WatcherCreation(String),

    #[error("failed to watch path '{path}': {reason}")]
    WatchPath { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_import_error_wraps_repository() {
        let err: ImportError = RepositoryError::NotFound.into();
        assert!(err.to_string().contains("entity not found"));
    }

    #[test]
    fn test_watch_error_display() {
        let err = WatchError::WatchPath {
            path: "/notes".to_string(),
            reason: "no such directory".to_string(),
        };
        assert!(err.to_string().contains("/notes"));
    }
}
