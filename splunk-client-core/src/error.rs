//! Error types for the core value types

use thiserror::Error;

/// Core error type for argument, resource and configuration handling
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid argument: {parameter} - {message}")]
    InvalidArgument { parameter: String, message: String },

    #[error("Conversion error: {entity} - {message}")]
    Conversion { entity: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::configuration(err.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl Error {
    /// Create an invalid argument error for the named parameter
    pub fn invalid_argument<S1: Into<String>, S2: Into<String>>(parameter: S1, message: S2) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a conversion error for a resource that could not be mapped to an entity
    pub fn conversion<S1: Into<String>, S2: Into<String>>(entity: S1, message: S2) -> Self {
        Self::Conversion {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this error is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    /// Check if this error is a conversion error
    pub fn is_conversion(&self) -> bool {
        matches!(self, Error::Conversion { .. })
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::Conversion { .. } => "conversion",
            Error::Configuration { .. } => "configuration",
            Error::Serialization(_) => "serialization",
            Error::Internal(_) => "internal",
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let invalid = Error::invalid_argument("username", "must not be empty");
        assert!(invalid.is_invalid_argument());
        assert!(!invalid.is_conversion());
        assert_eq!(invalid.category(), "invalid_argument");

        let conversion = Error::conversion("StoragePassword", "missing username");
        assert!(conversion.is_conversion());
        assert_eq!(conversion.category(), "conversion");
    }

    #[test]
    fn test_error_from_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let core_err: Error = json_err.into();
        assert_eq!(core_err.category(), "serialization");

        let core_err: Error = anyhow::anyhow!("boom").into();
        assert_eq!(core_err, Error::Internal("boom".to_string()));
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("criteria", "sort key cannot be empty");
        let display_str = format!("{}", err);
        assert!(display_str.contains("Invalid argument"));
        assert!(display_str.contains("criteria"));
        assert!(display_str.contains("sort key cannot be empty"));
    }
}
