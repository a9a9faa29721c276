//! ContentHasher trait for change detection.
//!
//! Defined in memolog-core so the importer can hash file content without
//! coupling to a specific hashing algorithm. The `Sha256ContentHasher`
//! adapter lives in memolog-infra.

/// Abstraction over content hashing for change detection.
///
/// Used by the importer to decide whether a journal file has changed since
/// its last import.
pub trait ContentHasher: Send + Sync {
    /// Compute a hex-encoded hash of the given content.
    fn compute_hash(&self, content: &str) -> String;
}
