//! Core error types.

use thiserror::Error;

/// Errors that can occur while assembling a reading.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The persisted installation identifier could not be read or created.
    #[error("identity store unavailable: {0}")]
    IdentityStore(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_error_display() {
        let e = CoreError::IdentityStore(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "locked",
        ));
        assert!(e.to_string().contains("identity store unavailable"));
        assert!(e.to_string().contains("locked"));
    }
}
