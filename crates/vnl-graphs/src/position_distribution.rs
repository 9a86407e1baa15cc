//! Pie chart of the court position distribution

use crate::aggregator::PositionDistributionView;
use crate::canvas::{Canvas, PieSeriesSpec, PieSlice, Series};
use crate::renderer::ChartRenderer;
use crate::types::{ChartStyle, LegendPosition, LegendSpec, PASTEL};
use tracing::debug;
use vnl_common::Result;

/// First wedge starts here, in degrees counter-clockwise from three o'clock
pub const START_ANGLE: f64 = 140.0;

/// Pie renderer for [`PositionDistributionView`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionPieChart;

impl ChartRenderer for PositionPieChart {
    type View = PositionDistributionView;

    fn render(
        &self,
        view: &PositionDistributionView,
        canvas: &mut dyn Canvas,
        style: &ChartStyle,
    ) -> Result<()> {
        self.apply_styling(canvas, style);
        canvas.set_title("Player Position Distribution", style.title);

        let slices = view
            .positions
            .iter()
            .zip(PASTEL.iter().cycle())
            .map(|(position, color)| PieSlice {
                label: position.position.clone(),
                value: position.count as f64,
                color: *color,
            })
            .collect();
        debug!(wedges = view.positions.len(), "Rendering position pie");

        canvas.draw_series(Series::Pie(PieSeriesSpec {
            slices,
            start_angle: START_ANGLE,
            label_distance: 1.1,
            percent_distance: 0.6,
            percent_decimals: 2,
            text: style.legend,
        }))?;
        canvas.add_legend(LegendSpec {
            position: LegendPosition::CenterRight,
            title: Some("Positions".to_string()),
            text: style.legend,
        });

        Ok(())
    }

    fn name(&self) -> &'static str {
        "position_distribution"
    }

    fn description(&self) -> &'static str {
        "Share of players at each court position"
    }
}
