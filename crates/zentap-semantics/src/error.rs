//! Semantic library error types.

use thiserror::Error;

/// Errors surfaced while loading the semantic library.
#[derive(Debug, Error)]
pub enum SemanticsError {
    /// The backing document could not be read.
    #[error("semantic source unreachable: {0}")]
    SourceUnreachable(String),

    /// The document was read but is not valid JSON of the expected shape.
    #[error("semantic document malformed: {0}")]
    Malformed(String),

    /// A previous load attempt failed; the cache is in its failed state.
    #[error("semantic library load previously failed: {0}")]
    LoadFailed(String),
}

/// Result type for semantic operations.
pub type SemanticsResult<T> = Result<T, SemanticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = SemanticsError::SourceUnreachable("connection refused".into());
        assert!(e.to_string().contains("connection refused"));

        let e = SemanticsError::Malformed("expected object".into());
        assert!(e.to_string().contains("malformed"));

        let e = SemanticsError::LoadFailed("timeout".into());
        assert!(e.to_string().contains("previously failed"));
    }
}
