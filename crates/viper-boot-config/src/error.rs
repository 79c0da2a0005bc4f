//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during settings loading and lookup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Base settings file not found.
    #[error("settings file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read a settings file.
    #[error("failed to read settings file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML settings: {0}")]
    TomlError(#[from] toml::de::Error),

    /// No settings table exists for the active environment.
    #[error("unknown settings environment: {environment}")]
    UnknownEnvironment {
        /// The environment that has no settings table.
        environment: String,
    },

    /// A settings key was requested but is not present.
    #[error("missing settings key: {key}")]
    MissingKey {
        /// The absent key.
        key: String,
    },
}

impl ConfigError {
    /// Create a new file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a new unknown environment error.
    pub fn unknown_environment(environment: impl Into<String>) -> Self {
        Self::UnknownEnvironment {
            environment: environment.into(),
        }
    }

    /// Create a new missing key error.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }
}
