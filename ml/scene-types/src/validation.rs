//! Label validation errors.

use thiserror::Error;

use crate::Label;

/// Errors raised when raw strings are checked against the label vocabulary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// String is not one of the 10 scene labels.
    #[error("invalid label: {value} (must be one of {})", Label::vocabulary())]
    Unknown {
        /// The rejected string.
        value: String,
    },

    /// A stored record carries a label outside the vocabulary.
    #[error("scene {token} has invalid label: {value} (must be one of {})", Label::vocabulary())]
    UnknownInRecord {
        /// Token of the offending record.
        token: String,
        /// The rejected string.
        value: String,
    },

    /// String is not a multi-label match mode.
    #[error("invalid match mode: {0} (must be \"any\" or \"all\")")]
    UnknownMode(String),
}

impl LabelError {
    /// Creates an unknown label error.
    #[must_use]
    pub fn unknown(value: impl Into<String>) -> Self {
        Self::Unknown {
            value: value.into(),
        }
    }

    /// Attaches the record token to an unknown label error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn in_record(self, token: impl Into<String>) -> Self {
        match self {
            Self::Unknown { value } => Self::UnknownInRecord {
                token: token.into(),
                value,
            },
            other => other,
        }
    }

    /// Creates an unknown match mode error.
    #[must_use]
    pub fn unknown_mode(mode: impl Into<String>) -> Self {
        Self::UnknownMode(mode.into())
    }

    /// Returns the rejected string.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Unknown { value } | Self::UnknownInRecord { value, .. } => value,
            Self::UnknownMode(mode) => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_names_value_and_vocabulary() {
        let msg = LabelError::unknown("NOT_A_LABEL").to_string();
        assert!(msg.contains("NOT_A_LABEL"));
        assert!(msg.contains("PED_CROSSING"));
        assert!(msg.contains("CONSTRUCTION_ZONE"));
    }

    #[test]
    fn error_in_record() {
        let err = LabelError::unknown("FOG").in_record("scene-0001");
        assert_eq!(err.value(), "FOG");
        let msg = err.to_string();
        assert!(msg.contains("scene-0001"));
        assert!(msg.contains("FOG"));
    }

    #[test]
    fn error_in_record_keeps_mode_errors() {
        let err = LabelError::unknown_mode("some").in_record("scene-0001");
        assert_eq!(err, LabelError::UnknownMode("some".to_string()));
    }

    #[test]
    fn error_unknown_mode() {
        let msg = LabelError::unknown_mode("some").to_string();
        assert!(msg.contains("some"));
        assert!(msg.contains("any"));
    }
}
