//! Error types for the TokClone application.

use thiserror::Error;

/// A shared error type for the entire TokClone application.
///
/// Most runtime failures in the client degrade to a visible fallback state
/// instead of surfacing as errors; this type covers the remaining cases
/// (startup configuration, catalog loading, form validation).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed user input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl TokError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TokError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TokError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TokError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, TokError>`.
pub type Result<T> = std::result::Result<T, TokError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_display() {
        let err = TokError::config("video catalog is empty");
        assert_eq!(err.to_string(), "Configuration error: video catalog is empty");
    }

    #[test]
    fn test_from_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TokError = parse_err.into();
        match err {
            TokError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("Expected serialization error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TokError = io_err.into();
        assert!(matches!(err, TokError::Io { .. }));
    }
}
