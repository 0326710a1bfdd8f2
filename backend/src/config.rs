//! Configuration management for the Bloom Minds prediction server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with BME__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{DEFAULT_YEARS_OF_HISTORY, MAX_YEARS_OF_HISTORY};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Prediction request defaults and limits
    pub prediction: PredictionConfig,

    /// Historical series generation
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionConfig {
    /// Years of history used when a request does not say
    pub default_years_history: u32,

    /// Upper bound on requested years of history, at most 10
    pub max_years_history: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HistoryConfig {
    /// Fixed seed for the mock series; unset draws from entropy per request
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("BME_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("prediction.default_years_history", i64::from(DEFAULT_YEARS_OF_HISTORY))?
            .set_default("prediction.max_years_history", i64::from(MAX_YEARS_OF_HISTORY))?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (BME__ prefix)
            .add_source(
                Environment::with_prefix("BME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.prediction.check()?;
        Ok(config)
    }

    /// `host:port` the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl PredictionConfig {
    fn check(&self) -> Result<(), ConfigError> {
        if self.max_years_history == 0 || self.max_years_history > MAX_YEARS_OF_HISTORY {
            return Err(ConfigError::Message(format!(
                "prediction.max_years_history must be between 1 and {}",
                MAX_YEARS_OF_HISTORY
            )));
        }
        if self.default_years_history == 0 || self.default_years_history > self.max_years_history {
            return Err(ConfigError::Message(
                "prediction.default_years_history must be between 1 and max_years_history".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            default_years_history: DEFAULT_YEARS_OF_HISTORY,
            max_years_history: MAX_YEARS_OF_HISTORY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prediction_limits() {
        let config = Config::default();
        assert_eq!(config.prediction.default_years_history, 3);
        assert_eq!(config.prediction.max_years_history, 10);
        assert!(config.prediction.check().is_ok());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_rejects_inconsistent_limits() {
        let too_wide = PredictionConfig {
            default_years_history: 3,
            max_years_history: 11,
        };
        assert!(too_wide.check().is_err());

        let default_above_max = PredictionConfig {
            default_years_history: 5,
            max_years_history: 4,
        };
        assert!(default_above_max.check().is_err());
    }
}
