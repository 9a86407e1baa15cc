//! Line chart of the mean attack score per age

use crate::aggregator::AttackByAgeView;
use crate::canvas::{Canvas, LineSeriesSpec, Series};
use crate::renderer::ChartRenderer;
use crate::types::{ChartStyle, GridAxis, GridSpec, LegendPosition, LegendSpec, INK};
use tracing::debug;
use vnl_common::Result;

/// Series label shown in the legend
pub const SERIES_LABEL: &str = "Average Attack Score";

/// Line chart renderer for [`AttackByAgeView`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackByAgeChart;

impl ChartRenderer for AttackByAgeChart {
    type View = AttackByAgeView;

    fn render(
        &self,
        view: &AttackByAgeView,
        canvas: &mut dyn Canvas,
        style: &ChartStyle,
    ) -> Result<()> {
        self.apply_styling(canvas, style);
        canvas.set_title("Average Attack Score by Age", style.title);
        canvas.set_axis_labels(Some("Age"), Some("Average Attack Score"), style.axis_label);
        canvas.set_grid(GridSpec::dashed(GridAxis::Y));

        let points: Vec<(f64, f64)> = view
            .points
            .iter()
            .map(|p| (p.age, p.mean_attack))
            .collect();
        debug!(points = points.len(), "Rendering attack by age line");

        canvas.draw_series(Series::Line(LineSeriesSpec {
            label: Some(SERIES_LABEL.to_string()),
            points,
            color: INK,
            width: 2,
            markers: true,
        }))?;
        canvas.add_legend(LegendSpec {
            position: LegendPosition::UpperRight,
            title: None,
            text: style.legend,
        });

        Ok(())
    }

    fn name(&self) -> &'static str {
        "attack_by_age"
    }

    fn description(&self) -> &'static str {
        "Average attack score of the players of each age"
    }
}
