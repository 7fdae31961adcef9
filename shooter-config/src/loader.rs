//! Configuration loading and environment variable handling

use crate::domains::ShooterConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "SHOOTER".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<ShooterConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: ShooterConfig = serde_yaml::from_str(&content)?;

        // Apply environment variable overrides
        self.apply_env_overrides(&mut config)?;

        // Validate all domains
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<ShooterConfig> {
        let mut config = ShooterConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<ShooterConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut ShooterConfig) -> ConfigResult<()> {
        self.apply_http_overrides(&mut config.http)?;
        self.apply_load_overrides(&mut config.load)?;
        self.apply_logging_overrides(&mut config.logging)?;

        Ok(())
    }

    /// Apply HTTP config overrides
    fn apply_http_overrides(
        &self,
        config: &mut crate::domains::http::HttpConfig,
    ) -> ConfigResult<()> {
        if let Ok(base_url) = self.get_env_var("BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(timeout) = self.get_env_var("HTTP_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_TIMEOUT: {}", e)))?;
            config.timeout = std::time::Duration::from_secs(seconds);
        }

        if let Ok(user_agent) = self.get_env_var("HTTP_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(verify_ssl) = self.get_env_var("HTTP_VERIFY_SSL") {
            config.verify_ssl = verify_ssl
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_VERIFY_SSL: {}", e)))?;
        }

        Ok(())
    }

    /// Apply load config overrides
    fn apply_load_overrides(
        &self,
        config: &mut crate::domains::load::LoadConfig,
    ) -> ConfigResult<()> {
        for (range, name) in [
            (&mut config.main_range, "MAIN_RANGE"),
            (&mut config.short_range, "SHORT_RANGE"),
            (&mut config.long_range, "LONG_RANGE"),
        ] {
            if let Ok(start) = self.get_env_var(&format!("{}_START", name)) {
                range.start = start.parse().map_err(|e| {
                    ConfigError::EnvError(format!("Invalid {}_START: {}", name, e))
                })?;
            }

            if let Ok(end) = self.get_env_var(&format!("{}_END", name)) {
                range.end = end
                    .parse()
                    .map_err(|e| ConfigError::EnvError(format!("Invalid {}_END: {}", name, e)))?;
            }
        }

        if let Ok(delay) = self.get_env_var("DELAY_MS") {
            config.pacing.delay_ms = delay
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid DELAY_MS: {}", e)))?;
        }

        if let Ok(enabled) = self.get_env_var("PACING_ENABLED") {
            config.pacing.enabled = enabled
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid PACING_ENABLED: {}", e)))?;
        }

        if let Ok(scheme) = self.get_env_var("NAMING_SCHEME") {
            config.naming_scheme = scheme
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("Invalid NAMING_SCHEME: {}", scheme)))?;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::load::NamingScheme;
    use crate::domains::logging::LogLevel;

    // Unique prefixes keep parallel tests from stepping on each other's vars

    #[test]
    fn test_env_overrides() {
        std::env::set_var("SHOOTER_T1_BASE_URL", "http://engine.test:9999");
        std::env::set_var("SHOOTER_T1_MAIN_RANGE_END", "5");
        std::env::set_var("SHOOTER_T1_DELAY_MS", "0");
        std::env::set_var("SHOOTER_T1_NAMING_SCHEME", "unified");
        std::env::set_var("SHOOTER_T1_LOG_LEVEL", "debug");

        let config = ConfigLoader::with_prefix("SHOOTER_T1").from_env().unwrap();
        assert_eq!(config.http.base_url, "http://engine.test:9999");
        assert_eq!(config.load.main_range.end, 5);
        assert_eq!(config.load.pacing.delay_ms, 0);
        assert_eq!(config.load.naming_scheme, NamingScheme::Unified);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_env_override_is_rejected() {
        std::env::set_var("SHOOTER_T2_MAIN_RANGE_START", "not-a-number");

        let result = ConfigLoader::with_prefix("SHOOTER_T2").from_env();
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    fn test_from_env_defaults_validate() {
        let config = ConfigLoader::with_prefix("SHOOTER_T3").from_env().unwrap();
        assert_eq!(config.load.main_range.start, 1);
        assert_eq!(config.load.main_range.end, 100);
    }
}
