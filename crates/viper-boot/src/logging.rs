//! Structured logging bootstrap.
//!
//! Wires `tracing-subscriber` with either a human-readable development
//! format or JSON for production, selected from the active settings
//! environment.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::AppError;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (e.g., "info", "debug").
    pub level: String,
    /// Whether to output JSON format.
    pub json_format: bool,
    /// Whether to include span events (new, close).
    pub span_events: bool,
    /// Whether to include file/line info.
    pub file_line_info: bool,
}

impl LogConfig {
    /// Human-readable output for development.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            file_line_info: true,
        }
    }

    /// JSON output for production.
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            span_events: false,
            file_line_info: false,
        }
    }

    /// Pick a preset for a settings environment.
    #[must_use]
    pub fn for_environment(environment: &str) -> Self {
        if environment == "production" {
            Self::production()
        } else {
            Self::development()
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

/// Initializes the logging subsystem.
///
/// # Errors
///
/// Returns `AppError::LoggingInit` if the level is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| AppError::LoggingInit(format!("invalid log level: {e}")))?;

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| AppError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| AppError::LoggingInit(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config() {
        let config = LogConfig::development();
        assert!(!config.json_format);
        assert!(config.span_events);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_production_config() {
        let config = LogConfig::production();
        assert!(config.json_format);
        assert!(!config.span_events);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_preset_selection() {
        assert!(LogConfig::for_environment("production").json_format);
        assert!(!LogConfig::for_environment("development").json_format);
        assert!(!LogConfig::for_environment("anything-else").json_format);
    }
}
