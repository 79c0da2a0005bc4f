//! Application error types.

use thiserror::Error;
use viper_boot_config::ConfigError;
use viper_boot_docs::DocsError;

/// Errors from the student service and controller.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The placeholder outbound call failed (network error or non-2xx).
    /// Propagated unretried.
    #[error("upstream call failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// A payload failed to serialize.
    #[error("failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Top-level application errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings loading or lookup failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Documentation generation or serving failed.
    #[error(transparent)]
    Docs(#[from] DocsError),

    /// A service operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The logging subsystem failed to initialize.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}
