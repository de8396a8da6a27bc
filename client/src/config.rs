//! Configuration management for the Rice Mill client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with RMS_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{BostaSize, UnitError};

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Remote backend configuration
    pub api: ApiConfig,

    /// Unit model configuration
    pub units: UnitsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the mill backend, e.g. `https://mill.example.com/api`
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Bearer credential; normally supplied through `RMS__API__TOKEN`
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UnitsConfig {
    /// Sack size preselected on forms (25 or 50)
    pub default_bosta_size: u32,
}

impl UnitsConfig {
    pub fn bosta_size(&self) -> Result<BostaSize, UnitError> {
        BostaSize::try_from(self.default_bosta_size)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RMS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://localhost:5000/api")?
            .set_default("api.timeout_secs", 15)?
            .set_default("units.default_bosta_size", 50)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RMS_ prefix)
            .add_source(
                Environment::with_prefix("RMS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config
            .units
            .bosta_size()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(config)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 15,
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_bosta_size() {
        let units = UnitsConfig {
            default_bosta_size: 25,
        };
        assert_eq!(units.bosta_size(), Ok(BostaSize::Kg25));

        let units = UnitsConfig {
            default_bosta_size: 40,
        };
        assert!(units.bosta_size().is_err());
    }

    #[test]
    fn test_api_defaults() {
        let api = ApiConfig::default();
        assert_eq!(api.timeout(), Duration::from_secs(15));
        assert!(api.token.is_none());
    }
}
