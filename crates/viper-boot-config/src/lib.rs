//! # Viper Boot Config
//!
//! Layered settings provider for viper-boot services.
//!
//! ## Features
//!
//! - **TOML file stack**: `settings.toml` plus optional environment and
//!   secrets overlays
//! - **Environment tables**: a `[default]` table merged with a per-environment
//!   table (`[development]`, `[production]`, ...)
//! - **Dotenv support**: a `.env` file next to the settings is loaded first
//! - **Environment variable overrides**: `VIPER_BOOT__SECTION__KEY` wins over
//!   every file layer
//!
//! ## Quick Start
//!
//! ```no_run
//! use viper_boot_config::Settings;
//!
//! # fn main() -> Result<(), viper_boot_config::ConfigError> {
//! let mut settings = Settings::load("config")?;
//! settings.set_environment("production");
//!
//! let resolved = settings.get()?;
//! println!("profile = {}", resolved["PROFILE"].as_str().unwrap_or("none"));
//! # Ok(())
//! # }
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::Settings;
