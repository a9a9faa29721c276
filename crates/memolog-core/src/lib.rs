//! Extraction and import logic for memolog.
//!
//! This crate defines the "ports" (repository and state-store traits) that
//! the infrastructure layer implements, the pure pattern-matching extractors
//! over markdown text, and the importer that drives idempotent upserts. It
//! depends only on `memolog-types` -- never on `memolog-infra` or any
//! database/IO crate.

pub mod hash;
pub mod import;
pub mod parse;
pub mod repository;
pub mod state_store;
