//! Server configuration.
//!
//! Sources, later overriding earlier:
//!
//! 1. built-in defaults
//! 2. `openversion.yaml` in the working directory, if present
//! 3. the YAML file named by `OPENVERSION_CONFIG`, if set
//! 4. environment variables such as `OPENVERSION__DATABASE_URL`

use ::config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Base name of the optional configuration file in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "openversion";

/// Environment variable naming an extra configuration file.
pub const CONFIG_ENV_VAR: &str = "OPENVERSION_CONFIG";

/// Prefix of configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "OPENVERSION";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ServerConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    /// A value was read but is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the version server binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// `PostgreSQL` URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub database_pool_size: u32,
    /// Seconds to wait for a pooled connection.
    pub database_timeout_secs: u64,
    /// Server-side `statement_timeout` applied to every connection, in
    /// seconds.
    pub database_statement_timeout_secs: u64,
    /// Compute attempts before a concurrency conflict is surfaced.
    pub max_attempts: u32,
    /// Fallback `tracing` filter when `OPENVERSION_LOG` is unset.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: None,
            database_pool_size: 10,
            database_timeout_secs: 5,
            database_statement_timeout_secs: 30,
            max_attempts: 3,
            log_filter: "info".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from files and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ServerConfigError::Load`] when a source is unreadable or
    /// malformed, and [`ServerConfigError::Invalid`] when a value is out of
    /// range.
    pub fn load() -> Result<Self, ServerConfigError> {
        let mut builder = Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let environment = Environment::with_prefix(CONFIG_ENV_PREFIX)
            .separator("__")
            .try_parsing(true);
        Self::build(builder.add_source(environment))
    }

    /// Parses configuration from a YAML document layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ServerConfigError`] as for [`Self::load`].
    pub fn from_yaml(yaml: &str) -> Result<Self, ServerConfigError> {
        Self::build(Config::builder().add_source(File::from_str(yaml, FileFormat::Yaml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ServerConfigError> {
        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.validate()
    }

    fn validate(self) -> Result<Self, ServerConfigError> {
        if self.database_pool_size == 0 {
            return Err(ServerConfigError::Invalid(
                "database_pool_size must be at least 1".to_owned(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ServerConfigError::Invalid(
                "max_attempts must be at least 1".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Returns the pooled-connection timeout.
    #[must_use]
    pub const fn database_timeout(&self) -> Duration {
        Duration::from_secs(self.database_timeout_secs)
    }

    /// Returns the per-statement timeout enforced by the database.
    #[must_use]
    pub const fn database_statement_timeout(&self) -> Duration {
        Duration::from_secs(self.database_statement_timeout_secs)
    }
}
