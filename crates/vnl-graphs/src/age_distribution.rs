//! Age histogram with its density overlay

use crate::aggregator::AgeHistogramView;
use crate::canvas::{Canvas, HistogramSeriesSpec, LineSeriesSpec, Series};
use crate::renderer::ChartRenderer;
use crate::types::{ChartStyle, GridAxis, GridSpec, INK, LIGHT_GREEN};
use tracing::debug;
use vnl_common::Result;

/// Bar opacity
pub const BAR_ALPHA: f64 = 0.7;

/// Histogram renderer for [`AgeHistogramView`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeDistributionChart;

impl ChartRenderer for AgeDistributionChart {
    type View = AgeHistogramView;

    fn render(
        &self,
        view: &AgeHistogramView,
        canvas: &mut dyn Canvas,
        style: &ChartStyle,
    ) -> Result<()> {
        self.apply_styling(canvas, style);
        canvas.set_title("Age Distribution of Players", style.title);
        canvas.set_axis_labels(Some("Age"), Some("Frequency"), style.axis_label);
        canvas.set_grid(GridSpec::dashed(GridAxis::Y));

        debug!(
            bins = view.bins.len(),
            density_points = view.density.len(),
            "Rendering age histogram"
        );

        canvas.draw_series(Series::Histogram(HistogramSeriesSpec {
            label: None,
            bins: view
                .bins
                .iter()
                .map(|b| (b.lower, b.upper, b.count as f64))
                .collect(),
            fill: LIGHT_GREEN,
            alpha: BAR_ALPHA,
            edge: INK,
        }))?;

        if !view.density.is_empty() {
            canvas.draw_series(Series::Line(LineSeriesSpec {
                label: None,
                points: view.density.iter().map(|p| (p.x, p.y)).collect(),
                color: LIGHT_GREEN,
                width: 2,
                markers: false,
            }))?;
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "age_distribution"
    }

    fn description(&self) -> &'static str {
        "Number of players per age bracket with a smoothed density curve"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{AgeHistogram, DataAggregator};
    use crate::canvas::{Layout, Surface};
    use crate::density::DENSITY_GRID_POINTS;
    use vnl_common::test_utils::table_fixtures;
    use vnl_common::{PlayerRecord, Table};
    use vnl_config::FigureConfig;

    fn style() -> ChartStyle {
        ChartStyle::from_figure(&FigureConfig::default()).unwrap()
    }

    #[test]
    fn test_render_draws_bins_and_density() {
        let view = AgeHistogram::default()
            .aggregate(&table_fixtures::squad())
            .unwrap();

        let mut surface = Surface::default();
        AgeDistributionChart.render(&view, &mut surface, &style()).unwrap();

        assert_eq!(surface.title(), Some("Age Distribution of Players"));
        assert_eq!(surface.axis_labels(), (Some("Age"), Some("Frequency")));
        assert_eq!(surface.layout(), Layout::Cartesian);
        assert!(surface.legend().is_none());

        let series = surface.series();
        assert_eq!(series.len(), 2);
        match (&series[0], &series[1]) {
            (Series::Histogram(hist), Series::Line(curve)) => {
                assert_eq!(hist.bins.len(), 20);
                assert_eq!(hist.bins.iter().map(|b| b.2).sum::<f64>(), 20.0);
                assert_eq!(hist.fill, LIGHT_GREEN);
                assert_eq!(hist.alpha, BAR_ALPHA);
                assert_eq!(hist.edge, INK);
                assert_eq!(curve.points.len(), DENSITY_GRID_POINTS);
                assert_eq!(curve.color, LIGHT_GREEN);
                assert!(!curve.markers);
            }
            other => panic!("expected histogram then curve, got {other:?}"),
        }
    }

    #[test]
    fn test_single_age_draws_no_curve() {
        let table = Table::from_records(vec![PlayerRecord::new(24, "FRA", "OH", 1.0, 1.0)]);
        let view = AgeHistogram::default().aggregate(&table).unwrap();

        let mut surface = Surface::default();
        AgeDistributionChart.render(&view, &mut surface, &style()).unwrap();
        assert_eq!(surface.series().len(), 1);
    }
}
