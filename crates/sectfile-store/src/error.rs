//! Error types for store operations.

use thiserror::Error;

/// Errors surfaced by the strict store API.
///
/// The compatibility API never returns these; it converts them into empty
/// results (reads) or advisory notices (writes).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The section name cannot be represented as a single header line.
    #[error("invalid section name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A body line cannot be represented as a single stored line.
    #[error("invalid line {index} for section {section:?}: {reason}")]
    InvalidLine {
        section: String,
        index: usize,
        reason: String,
    },

    /// The backing resource has not been created yet.
    #[error("resource does not exist: {0}")]
    ResourceMissing(String),

    /// The store configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error from the backing resource.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
