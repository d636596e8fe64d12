//! Configuration management for solharvest
//!
//! Settings are loaded from environment variables with defaults; command-line
//! flags override them.
//!
//! # Environment Variables
//!
//! - `SOLHARVEST_TIMEOUT`: build timeout in seconds, `0` for none - default: "0"
//! - `SOLHARVEST_SORT_ARTIFACTS`: sort build-info files by name (true|false) - default: "false"
//! - `SOLHARVEST_MISSING_OUTPUT`: override the missing build-info policy (fail|create) - default: per toolchain
//! - `SOLHARVEST_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use solharvest::HarvestConfig;
//!
//! let config = HarvestConfig::default();
//! config.validate().expect("Invalid configuration");
//! let options = config.build_options();
//! ```

use crate::harvest::ArtifactOrder;
use crate::orchestrator::BuildOptions;
use crate::toolchain::MissingOutputPolicy;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 0;
const MAX_TIMEOUT_SECS: u64 = 86_400;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    /// Build timeout in seconds; 0 disables the timeout
    pub timeout_secs: u64,

    /// Process build-info files in file-name order instead of listing order
    pub sort_artifacts: bool,

    pub missing_output_policy: Option<MissingOutputPolicy>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for HarvestConfig {
    /// Loads from `SOLHARVEST_*` environment variables, falling back to defaults
    /// for missing or unparsable values
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|_| Self::defaults())
    }
}

impl HarvestConfig {
    /// Built-in defaults, ignoring the environment
    pub fn defaults() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sort_artifacts: false,
            missing_output_policy: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Loads configuration from the environment, reporting unparsable values
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::defaults();

        if let Ok(value) = env::var("SOLHARVEST_TIMEOUT") {
            config.timeout_secs = value.trim().parse::<u64>().map_err(|e| ConfigError::ParseError {
                field: "SOLHARVEST_TIMEOUT".to_string(),
                error: e.to_string(),
            })?;
        }

        if let Ok(value) = env::var("SOLHARVEST_SORT_ARTIFACTS") {
            config.sort_artifacts =
                value.trim().parse::<bool>().map_err(|e| ConfigError::ParseError {
                    field: "SOLHARVEST_SORT_ARTIFACTS".to_string(),
                    error: e.to_string(),
                })?;
        }

        if let Ok(value) = env::var("SOLHARVEST_MISSING_OUTPUT") {
            config.missing_output_policy = Some(parse_policy(&value)?);
        }

        if let Ok(value) = env::var("SOLHARVEST_LOG_LEVEL") {
            config.log_level = value.to_lowercase();
        }

        Ok(config)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the timeout exceeds one day or the log level
    /// is not recognized
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::ValidationFailed(format!(
                "Build timeout cannot exceed {} seconds",
                MAX_TIMEOUT_SECS
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            timeout: self.timeout(),
            order: if self.sort_artifacts {
                ArtifactOrder::Lexicographic
            } else {
                ArtifactOrder::Listing
            },
            missing_output_policy: self.missing_output_policy,
        }
    }
}

pub fn parse_policy(value: &str) -> Result<MissingOutputPolicy, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "fail" => Ok(MissingOutputPolicy::Fail),
        "create" => Ok(MissingOutputPolicy::Create),
        other => Err(ConfigError::ParseError {
            field: "SOLHARVEST_MISSING_OUTPUT".to_string(),
            error: format!("unknown policy '{}', expected fail or create", other),
        }),
    }
}

impl fmt::Display for HarvestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "solharvest configuration:")?;
        match self.timeout() {
            Some(t) => writeln!(f, "  Timeout: {}s", t.as_secs())?,
            None => writeln!(f, "  Timeout: none")?,
        }
        writeln!(f, "  Sort artifacts: {}", self.sort_artifacts)?;
        match self.missing_output_policy {
            Some(policy) => writeln!(f, "  Missing output policy: {:?}", policy)?,
            None => writeln!(f, "  Missing output policy: per toolchain")?,
        }
        write!(f, "  Log level: {}", self.log_level)
    }
}
