//! Batch job error types.

use thiserror::Error;

/// Errors that can stop a batch job before or after the worker pool runs.
/// Per-combination generation failures are not here; those become
/// terminal failure records, not job errors.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The identifier universe document could not be read or parsed.
    #[error("identifier universe unavailable: {0}")]
    UniverseUnavailable(String),

    /// The identifier universe parsed but holds no entries.
    #[error("identifier universe is empty")]
    EmptyUniverse,

    /// Durable storage I/O failure.
    #[error("output store I/O error: {0}")]
    StoreIo(#[from] std::io::Error),

    /// Result map (de)serialization failure.
    #[error("output store serialization error: {0}")]
    StoreSerde(#[from] serde_json::Error),
}

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = BatchError::UniverseUnavailable("no such file".into());
        assert!(e.to_string().contains("no such file"));
        assert!(BatchError::EmptyUniverse.to_string().contains("empty"));
    }
}
