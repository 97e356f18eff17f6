use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sigstats.yaml";

/// Prefix of the environment overrides, e.g. `SIGSTATS_REMOTE__TOKEN`.
pub const ENV_PREFIX: &str = "SIGSTATS_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing access token: pass --token or set SIGSTATS_REMOTE__TOKEN")]
    MissingToken,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Invalid per_page: {0}. Must be between 1 and 100")]
    InvalidPerPage(u32),

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Database host cannot be empty when no database url is set")]
    EmptyDatabaseHost,

    #[error("Database name cannot be empty when no database url is set")]
    EmptyDatabaseName,

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `path`, or `sigstats.yaml` in the working directory (optional)
    /// 3. Environment variables (`SIGSTATS_*`, nested keys split on `__`)
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let file = path.map_or_else(|| Path::new(DEFAULT_CONFIG_FILE).to_path_buf(), Path::to_path_buf);
        if path.is_some() && !file.exists() {
            anyhow::bail!("Config file not found: {}", file.display());
        }

        let config: Config = Self::figment(&file)
            .extract()
            .context(format!("Failed to load configuration from {}", file.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.remote.per_page == 0 || config.remote.per_page > 100 {
            return Err(ConfigError::InvalidPerPage(config.remote.per_page));
        }

        if config.remote.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "remote.base_url cannot be empty".to_string(),
            ));
        }

        if config.remote.allowed_orgs.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "remote.allowed_orgs cannot be empty".to_string(),
            ));
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }

    /// Stricter checks needed before a reconciliation run can start.
    pub fn validate_for_run(config: &Config) -> Result<(), ConfigError> {
        Self::validate(config)?;

        if config.remote.token.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(ConfigError::MissingToken);
        }

        if config.database.explicit_url().is_none() {
            if config.database.host.is_empty() {
                return Err(ConfigError::EmptyDatabaseHost);
            }
            if config.database.name.is_empty() {
                return Err(ConfigError::EmptyDatabaseName);
            }
        }

        Ok(())
    }
}
