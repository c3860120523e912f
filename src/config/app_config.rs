//! Application Configuration - prediction endpoint and web server settings
//!
//! Each struct implements `Default` with the values the screening form ships
//! with, so the binary behaves sensibly when no config file is present.

use serde::{Deserialize, Serialize};
use std::net::ToSocketAddrs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use super::defaults;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "HRIDAYVANI_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "hridayvani.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a HridayVani deployment.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$HRIDAYVANI_CONFIG` env var
/// 2. `./hridayvani.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// External prediction service
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order.
    ///
    /// A file that fails to read, parse or validate is logged and skipped.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), endpoint = %config.prediction.endpoint, "Loaded config from HRIDAYVANI_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from HRIDAYVANI_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "HRIDAYVANI_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./hridayvani.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(endpoint = %config.prediction.endpoint, "Loaded config from ./hridayvani.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./hridayvani.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No hridayvani.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Apply command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, endpoint: Option<String>, addr: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.prediction.endpoint = endpoint;
        }
        if let Some(addr) = addr {
            self.server.addr = addr;
        }
        self
    }

    /// Validate every section, collecting all problems before failing.
    ///
    /// Rules:
    /// - The endpoint must be an absolute http(s) URL with a host
    /// - The request timeout must be between 1 s and the configured maximum
    /// - The server address must resolve as `HOST:PORT` (IP or host name)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        match reqwest::Url::parse(&self.prediction.endpoint) {
            Ok(url) => {
                if !matches!(url.scheme(), "http" | "https") {
                    errors.push(format!(
                        "prediction.endpoint ({}) must use http or https, not '{}'",
                        self.prediction.endpoint,
                        url.scheme()
                    ));
                }
                if url.host_str().is_none() {
                    errors.push(format!(
                        "prediction.endpoint ({}) has no host",
                        self.prediction.endpoint
                    ));
                }
            }
            Err(e) => errors.push(format!(
                "prediction.endpoint ({}) is not a valid URL: {}",
                self.prediction.endpoint, e
            )),
        }

        let timeout = self.prediction.timeout_secs;
        if timeout == 0 || timeout > defaults::MAX_PREDICTION_TIMEOUT_SECS {
            errors.push(format!(
                "prediction.timeout_secs = {} is outside 1-{}",
                timeout,
                defaults::MAX_PREDICTION_TIMEOUT_SECS
            ));
        }

        let resolves = self
            .server
            .addr
            .to_socket_addrs()
            .is_ok_and(|mut addrs| addrs.next().is_some());
        if !resolves {
            errors.push(format!(
                "server.addr ({}) must be HOST:PORT, e.g. {}",
                self.server.addr,
                defaults::DEFAULT_SERVER_ADDR
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Prediction Service
// ============================================================================

/// Where and how to reach the external prediction service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionConfig {
    /// Full URL of the prediction endpoint (POST target)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl PredictionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    defaults::DEFAULT_PREDICTION_ENDPOINT.to_string()
}
fn default_timeout_secs() -> u64 {
    defaults::PREDICTION_HTTP_TIMEOUT_SECS
}

// ============================================================================
// Server
// ============================================================================

/// HTTP server settings for `hridayvani serve`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

fn default_server_addr() -> String {
    defaults::DEFAULT_SERVER_ADDR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[prediction]
endpoint = "https://risk.example.org/predict"
"#,
        )
        .unwrap();
        assert_eq!(config.prediction.endpoint, "https://risk.example.org/predict");
        assert_eq!(config.prediction.timeout_secs, defaults::PREDICTION_HTTP_TIMEOUT_SECS);
        assert_eq!(config.server.addr, defaults::DEFAULT_SERVER_ADDR);
    }

    #[test]
    fn test_validation_collects_every_error() {
        let config = AppConfig {
            prediction: PredictionConfig {
                endpoint: "ftp://risk.example.org/predict".to_string(),
                timeout_secs: 0,
            },
            server: ServerConfig {
                addr: "localhost".to_string(),
            },
        };
        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3, "{errors:?}"),
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[test]
    fn test_host_name_server_addr_accepted() {
        let config = AppConfig::default().with_overrides(None, Some("localhost:3000".to_string()));
        config.validate().unwrap();
    }

    #[test]
    fn test_relative_endpoint_rejected() {
        let mut config = AppConfig::default();
        config.prediction.endpoint = "/predict".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let config = AppConfig::default().with_overrides(
            Some("http://10.0.0.5:5000/predict".to_string()),
            Some("0.0.0.0:8080".to_string()),
        );
        assert_eq!(config.prediction.endpoint, "http://10.0.0.5:5000/predict");
        assert_eq!(config.server.addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let text = AppConfig::default().to_toml().unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), AppConfig::default());
    }
}
