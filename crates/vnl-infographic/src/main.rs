//! Main entry point for the VNL infographic generator.

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use vnl_infographic::{run, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            // Logging settings live in the config, fall back to the defaults
            let _ = vnl_common::init_default_logging();
            error!("Failed to load configuration: {}", e);
            return Err(e).context("loading configuration");
        }
    };

    if args.verbose {
        vnl_common::init_dev_logging()?;
    } else {
        vnl_common::init_logging((&config.logging).into())?;
    }

    info!("Starting VNL infographic generator");

    match run(&config) {
        Ok(report) => {
            match &report.saved_to {
                Some(path) => info!(
                    rows = report.rows,
                    bytes = report.image_bytes,
                    "Infographic saved to {}",
                    path.display()
                ),
                None => info!(
                    rows = report.rows,
                    bytes = report.image_bytes,
                    "Infographic rendered"
                ),
            }
            Ok(())
        }
        Err(e) => {
            error!("Infographic generation failed: {}", e);
            Err(e).context("generating infographic")
        }
    }
}
