//! Error types for remote collection operations

use splunk_client_core::Message;
use thiserror::Error;

/// HTTP status the transport reports for a missing entity
pub const STATUS_NOT_FOUND: u16 = 404;

/// Collection layer error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Core error: {0}")]
    Core(#[from] splunk_client_core::Error),

    #[error("Not found: {entity} with name {id}")]
    NotFound { entity: String, id: String },

    #[error("Remote operation failed with status {status}: {detail}")]
    RemoteOperation {
        status: u16,
        detail: String,
        messages: Vec<Message>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid argument error for the named parameter
    pub fn invalid_argument<S1: Into<String>, S2: Into<String>>(parameter: S1, message: S2) -> Self {
        Self::Core(splunk_client_core::Error::invalid_argument(parameter, message))
    }

    /// Create a not found error for a specific entity type and name
    pub fn not_found<S1: Into<String>, S2: Into<String>>(entity: S1, id: S2) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a remote operation error as reported by a transport
    pub fn remote<S: Into<String>>(status: u16, detail: S, messages: Vec<Message>) -> Self {
        Self::RemoteOperation {
            status,
            detail: detail.into(),
            messages,
        }
    }

    /// Check if this error is a precondition failure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::Core(err) if err.is_invalid_argument())
    }

    /// Check if this error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if the transport answered 404
    pub fn is_remote_not_found(&self) -> bool {
        matches!(
            self,
            Error::RemoteOperation {
                status: STATUS_NOT_FOUND,
                ..
            }
        )
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Core(err) => err.category(),
            Error::NotFound { .. } => "not_found",
            Error::RemoteOperation { .. } => "remote_operation",
            Error::Serialization(_) => "serialization",
            Error::Internal(_) => "internal",
        }
    }
}

/// Convenience result type for collection operations
pub type Result<T> = std::result::Result<T, Error>;
