//! Error types for handler metadata and documentation generation.

use thiserror::Error;

/// Errors raised while building handler metadata.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// A schema location string outside the fixed enumeration.
    #[error("invalid schema location: {location}")]
    InvalidLocation {
        /// The rejected location string.
        location: String,
    },

    /// A second request-schema binding targeting the json body.
    #[error("handler already has a json-location schema binding")]
    DuplicateJsonBinding,
}

impl MetadataError {
    /// Create a new invalid location error.
    pub fn invalid_location(location: impl Into<String>) -> Self {
        Self::InvalidLocation {
            location: location.into(),
        }
    }
}

/// Errors that can occur during documentation generation and serving.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize or parse an OpenAPI document.
    #[error("failed to serialize OpenAPI spec: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error when reading or writing spec files.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// An HTTP method outside the OpenAPI method set at registration.
    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod {
        /// The rejected method.
        method: String,
    },

    /// Invalid handler metadata.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The documentation server failed to bind or serve.
    #[error("documentation server error: {reason}")]
    ServerError {
        /// The reason the server failed.
        reason: String,
    },
}

impl DocsError {
    /// Create a new unsupported method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create a new server error.
    pub fn server_error(reason: impl Into<String>) -> Self {
        Self::ServerError {
            reason: reason.into(),
        }
    }
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
