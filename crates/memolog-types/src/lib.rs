//! Shared domain types for memolog.
//!
//! This crate contains the record types produced by the journal extractors
//! (weight, nutrition, workout), the persisted watcher state, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod entry;
pub mod error;
pub mod state;
