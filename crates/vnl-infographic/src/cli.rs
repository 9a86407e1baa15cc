//! Command line arguments

use clap::Parser;
use std::path::PathBuf;
use vnl_common::Result;
use vnl_config::{Config, ConfigError, ConfigLoader};

/// Render the VNL player statistics infographic
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "vnl-infographic", version, about)]
pub struct Args {
    /// Player statistics CSV; overrides `data.csv_path`
    #[arg(value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the figure to this .png or .svg file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the aggregated chart data as JSON
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Pretty debug logs including span timings
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Load the configuration file (explicit, discovered or defaults) and
    /// layer the command line on top
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };

        self.apply(&mut config);
        config.validate_all().map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Copy the flags that were given into `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(csv) = &self.csv {
            config.data.csv_path = csv.to_string_lossy().into_owned();
        }
        if let Some(output) = &self.output {
            config.output.path = output.to_string_lossy().into_owned();
            config.output.save = true;
        }
        if let Some(summary) = &self.summary {
            config.output.summary_path = Some(summary.to_string_lossy().into_owned());
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}
