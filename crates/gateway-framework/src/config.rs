//! # Configuration
//!
//! [`GatewayConfig`] is read once at startup. Sources, later overriding earlier:
//!
//! 1. Built-in defaults
//! 2. `gateway.yaml` in the working directory (if present)
//! 3. The file named by `path` (if given; must exist)
//! 4. Environment variables prefixed with `GATEWAY_`, e.g. `GATEWAY_POLL_INTERVAL_MS=250`

use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "GATEWAY";

/// Default configuration file name, without extension.
pub const DEFAULT_CONFIG_FILE: &str = "gateway";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Wait between polls of a long-running operation, in milliseconds.
    pub poll_interval_ms: u64,
    /// Mailbox size of the local resource-group store.
    pub channel_capacity: usize,
    /// Page size of the local resource-group list cursor.
    pub page_size: usize,
    /// Polls a local delete reports as in progress before it completes.
    pub delete_polls: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            channel_capacity: 32,
            page_size: 2,
            delete_polls: 2,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from file and environment.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config, Environment, File, FileFormat};

        let mut builder = Config::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::new(path, FileFormat::Yaml).required(true));
        }

        let config: GatewayConfig = builder
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Zero-wait settings for tests.
    pub fn for_test() -> Self {
        Self {
            poll_interval_ms: 0,
            ..Self::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid("channel_capacity must be positive".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be positive".into()));
        }
        Ok(())
    }
}
