//! Application Configuration Module
//!
//! Provides the prediction endpoint and web server settings loaded from a TOML
//! file, falling back to built-in defaults when no file is present.
//!
//! ## Loading Order
//!
//! 1. `HRIDAYVANI_CONFIG` environment variable (path to TOML file)
//! 2. `hridayvani.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! let config = AppConfig::load();
//! let client = HttpPredictionClient::from_config(&config.prediction)?;
//! ```

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;
