//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};
use vnl_common::Result as VnlResult;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "VNL_CONFIG_PATH";

/// Files looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["vnl-infographic.yaml", "vnl-infographic.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for vnl_common::VnlError {
    fn from(err: ConfigError) -> Self {
        vnl_common::VnlError::config_with_source("Configuration could not be loaded", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        debug!("Reading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the environment and well-known files,
    /// falling back to defaults when none exist
    pub fn load() -> VnlResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
        {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> VnlResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Parse YAML text; omitted sections and fields keep their defaults
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, which maps a variable name to
    /// its value if set
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(csv_path) = lookup("VNL_CSV_PATH") {
            config.data.csv_path = csv_path;
        }

        if let Some(output_path) = lookup("VNL_OUTPUT_PATH") {
            config.output.path = output_path;
        }

        if let Some(save) = parse_var::<bool, _>(&lookup, "VNL_OUTPUT_SAVE")? {
            config.output.save = save;
        }

        if let Some(dpi) = parse_var::<u32, _>(&lookup, "VNL_FIGURE_DPI")? {
            config.figure.dpi = dpi;
        }

        if let Some(level) = lookup("VNL_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
                var: var.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}
