//! Error types for scene-dataset crate.

use std::path::PathBuf;

use scene_types::LabelError;
use thiserror::Error;

/// Errors that can occur in scene-dataset operations.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Corpus document does not exist.
    #[error("data file not found: {}", .path.display())]
    NotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Caller supplied or stored label is outside the vocabulary.
    #[error(transparent)]
    InvalidLabel(#[from] LabelError),

    /// Split ratios are negative, non-finite, or do not sum to 1.0.
    #[error("invalid split ratios {train}/{val}/{test}: ratios must be non-negative and sum to 1.0")]
    InvalidRatio {
        /// Training ratio.
        train: f64,
        /// Validation ratio.
        val: f64,
        /// Test ratio.
        test: f64,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(String),
}

impl CorpusError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an invalid ratio error.
    #[must_use]
    pub const fn invalid_ratio(train: f64, val: f64, test: f64) -> Self {
        Self::InvalidRatio { train, val, test }
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization(reason.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

impl From<std::io::Error> for CorpusError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CorpusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for scene-dataset operations.
pub type Result<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_not_found() {
        let err = CorpusError::not_found("/path/to/labels.json");
        assert!(err.to_string().contains("/path/to/labels.json"));
    }

    #[test]
    fn error_invalid_ratio() {
        let err = CorpusError::invalid_ratio(0.5, 0.3, 0.3);
        let msg = err.to_string();
        assert!(msg.contains("0.5/0.3/0.3"));
        assert!(msg.contains("sum to 1.0"));
    }

    #[test]
    fn error_invalid_label_is_transparent() {
        let err: CorpusError = LabelError::unknown("NOT_A_LABEL").into();
        assert!(matches!(err, CorpusError::InvalidLabel(_)));
        assert!(err.to_string().starts_with("invalid label: NOT_A_LABEL"));
    }

    #[test]
    fn error_serialization() {
        let err = CorpusError::serialization("invalid JSON");
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn error_validation() {
        let err = CorpusError::validation("missing labels");
        assert!(err.to_string().contains("missing labels"));
    }

    #[test]
    fn error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CorpusError = io_err.into();
        assert!(matches!(err, CorpusError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn error_from_serde_error() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: CorpusError = json_err.into();
        assert!(matches!(err, CorpusError::Serialization(_)));
    }
}
