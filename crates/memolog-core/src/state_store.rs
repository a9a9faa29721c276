//! StateStore trait definition (port).
//!
//! Persistence of the watcher-state JSON file is an injected side effect so
//! the importer stays a pure function over `(state, file) -> (state, report)`.
//! The `JsonStateStore` implementation lives in memolog-infra.

use memolog_types::error::StateError;
use memolog_types::state::WatcherState;

/// Port for loading and saving the watcher state.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait StateStore: Send + Sync {
    /// Load the persisted state, or a default state if none exists yet.
    fn load(&self) -> impl std::future::Future<Output = Result<WatcherState, StateError>> + Send;

    /// Persist the full state, replacing any previous snapshot.
    fn save(
        &self,
        state: &WatcherState,
    ) -> impl std::future::Future<Output = Result<(), StateError>> + Send;
}
