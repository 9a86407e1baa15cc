//! Test utilities and shared fixtures for the infographic workspace.
//!
//! Enabled for dependents through the `testing` feature.

use crate::{PlayerRecord, Table};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "`{left}` is not within {tolerance} of `{right}` (diff: {diff})"
    );
}

/// Player table fixtures.
pub mod table_fixtures {
    use super::*;

    /// The three row table used by the end-to-end scenario.
    pub fn three_players() -> Table {
        Table::from_records(vec![
            PlayerRecord::new(20, "FR", "OH", 30.0, 10.0),
            PlayerRecord::new(20, "JP", "L", 20.0, 15.0),
            PlayerRecord::new(25, "FR", "OH", 40.0, 5.0),
        ])
    }

    /// A small squad spread over more than ten countries, CSV encoded like
    /// the VNL export (extra columns included).
    pub fn squad_csv() -> &'static str {
        "\
Player,Country,Age,Attack,Block,Serve,Set,Dig,Receive,Position
A,FRA,27,13.5,0.8,1.2,0.3,3.7,3.2,OH
B,FRA,32,10.3,0.6,1.1,0.3,4.6,2.6,OH
C,JPN,21,0.0,0.0,0.0,0.0,6.8,6.5,L
D,JPN,28,12.0,1.5,0.9,0.2,2.1,1.0,OP
E,POL,24,11.2,2.4,0.7,0.1,1.4,0.2,MB
F,POL,30,1.1,0.5,0.4,9.8,2.2,0.1,S
G,ITA,19,9.8,1.1,0.8,0.2,3.0,2.9,OH
H,ITA,22,2.0,2.9,0.3,0.1,0.8,0.0,MB
I,USA,26,10.9,1.0,0.6,0.2,2.5,1.8,OP
J,USA,31,0.5,0.4,0.2,8.7,2.9,0.3,S
K,SLO,29,8.4,1.8,0.5,0.1,1.1,0.4,MB
L,BRA,25,12.6,0.9,1.0,0.3,3.3,3.0,OH
M,ARG,23,9.1,0.7,0.5,0.2,4.1,3.8,OH
N,SRB,20,10.0,1.2,0.6,0.1,1.7,0.9,OP
O,CAN,33,7.7,2.2,0.4,0.1,0.9,0.1,MB
P,GER,18,6.5,0.3,0.9,0.2,5.2,4.9,L
Q,NED,26,11.8,1.4,0.8,0.2,2.6,1.5,OP
R,IRI,24,5.9,2.6,0.3,0.1,0.7,0.0,MB
S,CHN,22,8.8,1.9,0.5,0.2,2.0,1.2,OH
T,BUL,27,7.1,0.6,0.6,6.5,2.4,0.2,S
"
    }

    /// Parsed [`squad_csv`].
    pub fn squad() -> Table {
        Table::from_reader(squad_csv().as_bytes()).expect("fixture CSV is valid")
    }
}
