//! # VNL Graphs
//!
//! Aggregation and rendering of the player statistics infographic.
//!
//! Each chart pairs a [`DataAggregator`] that reduces the player table to a
//! serializable view with a [`ChartRenderer`] that describes the view on a
//! retained-mode [`Canvas`]. The [`InfographicComposer`] lays the four
//! panels out in a 2x2 grid next to a description panel and renders the
//! figure with plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod canvas;
pub mod composer;
pub mod density;
pub mod renderer;
pub mod types;

// Chart renderers
pub mod age_distribution;
pub mod attack_by_age;
pub mod position_distribution;
pub mod top_countries;

pub use aggregator::*;
pub use canvas::{font_available, Canvas, Layout, Series, Surface};
pub use composer::*;
pub use renderer::*;
pub use types::*;

pub use age_distribution::AgeDistributionChart;
pub use attack_by_age::AttackByAgeChart;
pub use position_distribution::PositionPieChart;
pub use top_countries::TopCountriesChart;
