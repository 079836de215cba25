//! ALFA Biometrics - Error Types
//!
//! Crate-level failures. Authentication attempts never surface these;
//! they report a [`BiometricOutcome`](crate::outcome::BiometricOutcome).

use thiserror::Error;

/// Result type for crate-level operations
pub type BioResult<T> = Result<T, BioError>;

/// Crate-level error types
#[derive(Error, Debug)]
pub enum BioError {
    // ═══════════════════════════════════════════════════════════════
    // CONFIG ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl BioError {
    /// Check if the error came from reading or parsing configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BioError::InvalidConfig(_) | BioError::DeserializationError(_) | BioError::IoError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let err: BioError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, BioError::IoError(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_serialization_error_is_not_config() {
        let err = BioError::SerializationError("boom".into());
        assert!(!err.is_config_error());
        assert_eq!(err.to_string(), "Serialization error: boom");
    }
}
