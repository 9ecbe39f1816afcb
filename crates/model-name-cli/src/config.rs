//! CLI configuration
//!
//! Configuration is loaded from, in order (later sources override earlier):
//! - `config/default.toml`
//! - `config/{environment}.toml`
//! - Environment variables prefixed `MODEL_NAME`
//! - Command-line arguments

use config::{Config, ConfigError, Environment, File};
use model_name_core::NameDefaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Parts used to complete short names
    #[serde(default)]
    pub defaults: NameDefaults,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON formatting
    #[serde(default)]
    pub json_format: bool,

    /// Include target module
    #[serde(default = "default_true")]
    pub include_target: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            include_target: default_true(),
        }
    }
}

impl CliConfig {
    /// Load configuration from files and environment
    ///
    /// Environment variables use `__` between path segments, e.g.
    /// `MODEL_NAME__DEFAULTS__HOST=mirror.local`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration source cannot be parsed
    pub fn load(config_dir: impl Into<PathBuf>, environment: &str) -> Result<Self, ConfigError> {
        let config_dir = config_dir.into();

        let config = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", environment))).required(false),
            )
            .add_source(
                Environment::with_prefix("MODEL_NAME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration, falling back to defaults if it cannot be loaded
    pub fn load_or_default(config_dir: impl Into<PathBuf>, environment: &str) -> Self {
        Self::load(config_dir, environment).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load configuration: {}", e);
            eprintln!("Using default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.defaults.host, "registry.ollama.ai");
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json_format);
    }

    #[test]
    fn test_load_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(dir.path(), "development").unwrap();
        assert_eq!(config.defaults, NameDefaults::default());
    }

    #[test]
    fn test_environment_file_overrides_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[defaults]\nhost = \"mirror.local\"\nnamespace = \"team\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("production.toml"),
            "[defaults]\nnamespace = \"prod\"\n\n[logging]\njson_format = true\n",
        )
        .unwrap();

        let config = CliConfig::load(dir.path(), "production").unwrap();
        assert_eq!(config.defaults.host, "mirror.local");
        assert_eq!(config.defaults.namespace, "prod");
        assert_eq!(config.defaults.tag, "latest");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_load_or_default_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "defaults = [").unwrap();

        let config = CliConfig::load_or_default(dir.path(), "development");
        assert_eq!(config.defaults, NameDefaults::default());
    }
}
