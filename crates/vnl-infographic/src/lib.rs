//! # VNL Infographic
//!
//! Command line front end: loads the configuration, reads the player CSV,
//! composes the four-panel infographic and renders it in memory or to disk.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;

pub use cli::Args;

use std::path::PathBuf;
use tracing::{info, instrument, warn};
use vnl_common::{Result, Table};
use vnl_config::Config;
use vnl_graphs::{font_available, ImageFormat, InfographicComposer};

/// What a pipeline run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Rows read from the CSV
    pub rows: usize,
    /// Encoding of the rendered figure
    pub format: ImageFormat,
    /// Size of the rendered figure
    pub image_bytes: usize,
    /// Where the figure was written, if saving is enabled
    pub saved_to: Option<PathBuf>,
    /// Where the JSON summary was written
    pub summary_to: Option<PathBuf>,
}

/// Run the whole pipeline for `config`.
///
/// The figure is always rendered; it is only written to `output.path` when
/// `output.save` is set.
#[instrument(skip_all, fields(csv = %config.data.csv_path))]
pub fn run(config: &Config) -> Result<RunReport> {
    let table = Table::from_path(&config.data.csv_path)?;
    info!(rows = table.len(), "Loaded player table");

    let (figure, summary) = InfographicComposer::new(config).compose(&table)?;

    if !font_available(&config.figure.font_family) {
        warn!(
            "Font family '{}' could not be loaded, rendering text may fail",
            config.figure.font_family
        );
    }

    let output = PathBuf::from(&config.output.path);
    let format = ImageFormat::from_path(&output)?;
    let (image_bytes, saved_to) = if config.output.save {
        (figure.render_to_file(&output)?, Some(output))
    } else {
        let bytes = figure.render_to_bytes(format)?;
        info!(bytes = bytes.len(), "Rendered figure in memory, saving is disabled");
        (bytes.len(), None)
    };

    let summary_to = match &config.output.summary_path {
        Some(path) => {
            summary.write_json(path)?;
            Some(PathBuf::from(path))
        }
        None => None,
    };

    Ok(RunReport {
        rows: table.len(),
        format,
        image_bytes,
        saved_to,
        summary_to,
    })
}
