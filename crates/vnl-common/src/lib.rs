//! # VNL Common
//!
//! Shared types and utilities for the VNL infographic workspace.
//!
//! This crate provides the error type every other crate returns, the
//! tracing subscriber setup, and the player table read from the CSV export.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod players;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, VnlError};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
pub use players::{PlayerRecord, Table};
