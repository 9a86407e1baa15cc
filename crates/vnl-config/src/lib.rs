//! # VNL Config
//!
//! Type-safe configuration for the VNL infographic.
//!
//! Settings come from an optional YAML file, are overridden by `VNL_*`
//! environment variables, and are validated with `validator` before use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    ChartsConfig, Config, DataConfig, FigureConfig, FontSizes, LoggingConfig, OutputConfig,
};
