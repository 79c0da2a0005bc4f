//! Layered settings resolution.
//!
//! Settings live in per-environment tables inside a stack of TOML files.
//! Resolution order, lowest to highest precedence:
//!
//! 1. `settings.toml` — base settings (required)
//! 2. `settings_dev.toml` — development settings (optional)
//! 3. `settings_prd.toml` — production settings (optional)
//! 4. `.secrets.toml` — sensitive values, kept out of version control (optional)
//! 5. process environment variables with the `VIPER_BOOT` prefix
//!
//! A local `.env` file next to the settings files is loaded into the process
//! environment (via `dotenvy`) before the environment variables are read.
//!
//! Within each file, the `[default]` table applies to every environment and
//! the table named after the active environment overrides it:
//!
//! ```toml
//! [default]
//! PROFILE = "none"
//!
//! [development]
//! PROFILE = "dev"
//!
//! [production]
//! PROFILE = "prd"
//! ```
//!
//! [`Settings::get`] re-resolves the full layered tree on every call, so
//! changing the active environment takes effect immediately.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Base settings file, always required.
const BASE_FILE: &str = "settings.toml";

/// Optional overlay files, applied in order.
const OVERLAY_FILES: [&str; 3] = ["settings_dev.toml", "settings_prd.toml", ".secrets.toml"];

/// Table applied to every environment.
const DEFAULT_SECTION: &str = "default";

/// The application settings handle.
///
/// Constructed once at startup and passed explicitly to whatever needs it.
/// The active environment is a plain mutable field; lookups through
/// [`Settings::get`] always reflect its current value.
///
/// # Example
///
/// ```no_run
/// use viper_boot_config::Settings;
///
/// # fn main() -> Result<(), viper_boot_config::ConfigError> {
/// let mut settings = Settings::load("config")?;
/// settings.set_environment("production");
/// let resolved = settings.get()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Settings {
    environment: String,
    env_prefix: String,
    layers: Vec<toml::Table>,
}

impl Settings {
    /// Environment used when none is set explicitly.
    pub const DEFAULT_ENVIRONMENT: &'static str = "development";

    /// Prefix for environment variable overrides (`VIPER_BOOT__SECTION__KEY`).
    pub const DEFAULT_ENV_PREFIX: &'static str = "VIPER_BOOT";

    /// Load the settings file stack from a directory.
    ///
    /// The base `settings.toml` must exist; the overlay files are optional.
    /// A `.env` file in the same directory is loaded into the process
    /// environment if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base file is missing or any present
    /// file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();

        // Local dotenv override, ignored when absent.
        let _ = dotenvy::from_path(dir.join(".env"));

        let base_path = dir.join(BASE_FILE);
        if !base_path.exists() {
            return Err(ConfigError::file_not_found(base_path));
        }

        let mut layers = vec![Self::parse_file(&base_path)?];
        for name in OVERLAY_FILES {
            let path = dir.join(name);
            if path.exists() {
                layers.push(Self::parse_file(&path)?);
            }
        }

        Ok(Self {
            environment: Self::DEFAULT_ENVIRONMENT.to_string(),
            env_prefix: Self::DEFAULT_ENV_PREFIX.to_string(),
            layers,
        })
    }

    /// The active environment name.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Switch the active environment.
    ///
    /// Takes effect on the next call to [`Settings::get`].
    pub fn set_environment(&mut self, environment: impl Into<String>) {
        self.environment = environment.into();
    }

    /// Use a different prefix for environment variable overrides.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_uppercase();
        self
    }

    /// Resolve the settings tree for the active environment.
    ///
    /// Merges every layer's `[default]` table, then every layer's table for
    /// the active environment, then applies prefixed environment variable
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownEnvironment` if no layer carries a table
    /// for the active environment.
    pub fn get(&self) -> Result<toml::Table, ConfigError> {
        let mut resolved = toml::Table::new();

        for layer in &self.layers {
            if let Some(toml::Value::Table(table)) = layer.get(DEFAULT_SECTION) {
                deep_merge(&mut resolved, table);
            }
        }

        let mut environment_found = false;
        for layer in &self.layers {
            if let Some(toml::Value::Table(table)) = layer.get(&self.environment) {
                deep_merge(&mut resolved, table);
                environment_found = true;
            }
        }

        if !environment_found {
            return Err(ConfigError::unknown_environment(&self.environment));
        }

        apply_env_overrides(&mut resolved, &self.env_prefix, env::vars());
        Ok(resolved)
    }

    /// Look up a dotted key (e.g. `"API.url"`) as a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if any path segment is absent or
    /// the leaf is not a string, and propagates resolution errors from
    /// [`Settings::get`].
    pub fn get_str(&self, dotted_key: &str) -> Result<String, ConfigError> {
        let resolved = self.get()?;
        let mut current = &toml::Value::Table(resolved);
        for segment in dotted_key.split('.') {
            current = current
                .get(segment)
                .ok_or_else(|| ConfigError::missing_key(dotted_key))?;
        }
        current
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::missing_key(dotted_key))
    }

    fn parse_file(path: &Path) -> Result<toml::Table, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        Ok(toml::from_str(&content)?)
    }
}

/// Recursively merge `overlay` into `target`; tables merge, scalars overwrite.
fn deep_merge(target: &mut toml::Table, overlay: &toml::Table) {
    for (key, value) in overlay {
        match (target.get_mut(key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                deep_merge(existing, incoming);
            }
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Apply `PREFIX__SECTION__KEY` overrides onto a resolved settings tree.
fn apply_env_overrides(
    resolved: &mut toml::Table,
    prefix: &str,
    vars: impl Iterator<Item = (String, String)>,
) {
    let marker = format!("{prefix}__");
    for (key, value) in vars {
        let Some(path) = key.strip_prefix(&marker) else {
            continue;
        };
        let segments: Vec<&str> = path.split("__").filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            continue;
        }
        insert_path(resolved, &segments, parse_env_value(&value));
    }
}

/// Insert a value at a nested key path, creating intermediate tables.
fn insert_path(table: &mut toml::Table, segments: &[&str], value: toml::Value) {
    match segments {
        [] => {}
        [leaf] => {
            table.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = table
                .entry((*head).to_string())
                .or_insert_with(|| toml::Value::Table(toml::Table::new()));
            if !entry.is_table() {
                *entry = toml::Value::Table(toml::Table::new());
            }
            if let toml::Value::Table(nested) = entry {
                insert_path(nested, rest, value);
            }
        }
    }
}

/// Parse an environment variable into the closest TOML scalar.
fn parse_env_value(value: &str) -> toml::Value {
    if let Ok(b) = value.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if let Ok(i) = value.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = value.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(value.to_string())
}
