//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (memolog-infra) implements. The core crate never depends on any specific
//! storage technology. Every collection supports point lookups by date --
//! the only access pattern the importer needs.

pub mod nutrition;
pub mod weight;
pub mod workout;
