//! Engine configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Largest accepted point count.
pub const MAX_POINT_COUNT: usize = 100_000;

const ENV_POINT_COUNT: &str = "PAYOFF_POINT_COUNT";
const ENV_INITIAL_LEVEL: &str = "PAYOFF_INITIAL_LEVEL";
const ENV_PHOENIX_YEARS: &str = "PAYOFF_PHOENIX_YEARS";
const ENV_LOG_LEVEL: &str = "PAYOFF_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Point count outside `1..=MAX_POINT_COUNT`
    #[error("Invalid point count: {0}. Must be between 1 and 100000")]
    InvalidPointCount(usize),

    /// Initial level not finite and positive
    #[error("Invalid initial level: {0}. Must be finite and positive")]
    InvalidInitialLevel(f64),

    /// No representative years for memory products
    #[error("Phoenix years must not be empty")]
    EmptyPhoenixYears,

    /// Unrecognised log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Config file unreadable or malformed
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable malformed
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose
    Trace,
    /// Resolution steps
    Debug,
    /// Catalog loading
    #[default]
    Info,
    /// Substituted inputs
    Warn,
    /// Failures only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Engine configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sampling intervals per curve (the sampler returns one more point)
    pub point_count: usize,
    /// Reference initial level, also the substitute for malformed inputs
    pub initial_level: f64,
    /// Representative elapsed years for memory products
    pub phoenix_years: Vec<u32>,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            point_count: 120,
            initial_level: 100.0,
            phoenix_years: (1..=6).collect(),
            log_level: LogLevel::Info,
        }
    }
}

impl EngineConfig {
    /// Create a new EngineConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields for every variable `lookup` returns.
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_POINT_COUNT) {
            self.point_count = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={}", ENV_POINT_COUNT, raw)))?;
        }

        if let Some(raw) = lookup(ENV_INITIAL_LEVEL) {
            self.initial_level = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={}", ENV_INITIAL_LEVEL, raw)))?;
        }

        // Comma-separated years
        if let Some(raw) = lookup(ENV_PHOENIX_YEARS) {
            self.phoenix_years = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse()
                        .map_err(|_| ConfigError::EnvError(format!("{}={}", ENV_PHOENIX_YEARS, raw)))
                })
                .collect::<Result<Vec<u32>, _>>()?;
        }

        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&raw)?;
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.point_count == 0 || self.point_count > MAX_POINT_COUNT {
            return Err(ConfigError::InvalidPointCount(self.point_count));
        }

        if !self.initial_level.is_finite() || self.initial_level <= 0.0 {
            return Err(ConfigError::InvalidInitialLevel(self.initial_level));
        }

        if self.phoenix_years.is_empty() {
            return Err(ConfigError::EmptyPhoenixYears);
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(point_count) = cli.point_count {
            self.point_count = point_count;
        }
        if let Some(initial_level) = cli.initial_level {
            self.initial_level = initial_level;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Point count override
    pub point_count: Option<usize>,
    /// Initial level override
    pub initial_level: Option<f64>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<EngineConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

fn build_config_with<F>(cli: &CliArgs, env: F) -> Result<EngineConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        EngineConfig::from_file(config_path)?
    } else {
        EngineConfig::default()
    };

    config.apply_env(env)?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.point_count, 120);
        assert_eq!(config.initial_level, 100.0);
        assert_eq!(config.phoenix_years, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.point_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPointCount(0))
        ));

        let mut config = EngineConfig::default();
        config.initial_level = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidInitialLevel(_))
        ));

        let mut config = EngineConfig::default();
        config.initial_level = -5.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.phoenix_years.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPhoenixYears)
        ));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EngineConfig::from_toml_str(
            r#"
            point_count = 200
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.point_count, 200);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.initial_level, 100.0);
    }

    #[test]
    fn test_from_toml_rejects_bad_log_level() {
        let result = EngineConfig::from_toml_str(r#"log_level = "loud""#);
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let path = PathBuf::from("/nonexistent/payoff.toml");
        assert!(matches!(
            EngineConfig::from_file(&path),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = EngineConfig::default();
        config
            .apply_env(env_of(&[
                (ENV_POINT_COUNT, "50"),
                (ENV_PHOENIX_YEARS, "1, 3,5"),
                (ENV_LOG_LEVEL, "warn"),
            ]))
            .unwrap();
        assert_eq!(config.point_count, 50);
        assert_eq!(config.phoenix_years, vec![1, 3, 5]);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.initial_level, 100.0);
    }

    #[test]
    fn test_env_parse_errors() {
        let mut config = EngineConfig::default();
        let result = config.apply_env(env_of(&[(ENV_INITIAL_LEVEL, "abc")]));
        assert!(matches!(result, Err(ConfigError::EnvError(_))));

        let result = config.apply_env(env_of(&[(ENV_PHOENIX_YEARS, "1,x")]));
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    fn test_priority_cli_over_env_over_file() {
        let path = std::env::temp_dir().join(format!(
            "payoff_engine_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "point_count = 80\ninitial_level = 50.0\n").unwrap();

        let cli = CliArgs {
            config_file: Some(path.clone()),
            point_count: Some(10),
            ..Default::default()
        };
        let config =
            build_config_with(&cli, env_of(&[(ENV_POINT_COUNT, "40"), (ENV_LOG_LEVEL, "error")]))
                .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.point_count, 10);
        assert_eq!(config.initial_level, 50.0);
        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_cli_validation_applies_last() {
        let cli = CliArgs {
            initial_level: Some(0.0),
            ..Default::default()
        };
        let result = build_config_with(&cli, env_of(&[]));
        assert!(matches!(result, Err(ConfigError::InvalidInitialLevel(_))));
    }
}
