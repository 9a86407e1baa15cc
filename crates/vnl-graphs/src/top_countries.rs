//! Horizontal bar chart of the top countries by mean attack and mean block

use crate::aggregator::TopCountriesView;
use crate::canvas::{BarSeriesSpec, Canvas, Series};
use crate::renderer::ChartRenderer;
use crate::types::{ChartStyle, GridAxis, GridSpec, LegendPosition, LegendSpec, ORANGE, SKY_BLUE};
use tracing::debug;
use vnl_common::Result;

/// Legend label of the attack bars
pub const ATTACK_LABEL: &str = "Average Attack";
/// Legend label of the block bars
pub const BLOCK_LABEL: &str = "Average Block";

/// Overlapping horizontal bars, attack drawn first and block on top
#[derive(Debug, Clone, Copy, Default)]
pub struct TopCountriesChart;

impl TopCountriesChart {
    /// Title naming how many countries each metric keeps
    pub fn title(limit: usize) -> String {
        format!("Top {limit} Countries: Average Attack and Block")
    }
}

impl ChartRenderer for TopCountriesChart {
    type View = TopCountriesView;

    fn render(
        &self,
        view: &TopCountriesView,
        canvas: &mut dyn Canvas,
        style: &ChartStyle,
    ) -> Result<()> {
        self.apply_styling(canvas, style);
        canvas.set_title(&Self::title(view.limit), style.title);
        canvas.set_axis_labels(Some("Average Score"), Some("Country"), style.axis_label);
        canvas.set_grid(GridSpec::dashed(GridAxis::X));

        debug!(countries = view.countries.len(), "Rendering top countries bars");

        let attack = view
            .countries
            .iter()
            .map(|c| (c.country.clone(), c.attack))
            .collect();
        canvas.draw_series(Series::Bars(BarSeriesSpec {
            label: Some(ATTACK_LABEL.to_string()),
            bars: attack,
            color: SKY_BLUE,
        }))?;

        let block = view
            .countries
            .iter()
            .map(|c| (c.country.clone(), c.block))
            .collect();
        canvas.draw_series(Series::Bars(BarSeriesSpec {
            label: Some(BLOCK_LABEL.to_string()),
            bars: block,
            color: ORANGE,
        }))?;

        canvas.add_legend(LegendSpec {
            position: LegendPosition::UpperRight,
            title: None,
            text: style.legend,
        });

        Ok(())
    }

    fn name(&self) -> &'static str {
        "top_countries"
    }

    fn description(&self) -> &'static str {
        "Countries with the highest average attack and block scores"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{DataAggregator, TopCountries};
    use crate::canvas::{Layout, Surface};
    use vnl_common::test_utils::table_fixtures;
    use vnl_config::FigureConfig;

    fn render(limit: usize) -> Surface {
        let style = ChartStyle::from_figure(&FigureConfig::default()).unwrap();
        let view = TopCountries::new(limit)
            .aggregate(&table_fixtures::squad())
            .unwrap();

        let mut surface = Surface::default();
        TopCountriesChart.render(&view, &mut surface, &style).unwrap();
        surface
    }

    #[test]
    fn test_title_names_the_limit() {
        assert_eq!(
            TopCountriesChart::title(10),
            "Top 10 Countries: Average Attack and Block"
        );
        assert_eq!(render(5).title(), Some("Top 5 Countries: Average Attack and Block"));
    }

    #[test]
    fn test_attack_drawn_before_block() {
        let surface = render(10);

        assert_eq!(surface.layout(), Layout::Categorical);
        assert_eq!(surface.axis_labels(), (Some("Average Score"), Some("Country")));
        assert_eq!(surface.grid().unwrap().axis, GridAxis::X);
        assert_eq!(surface.legend().unwrap().position, LegendPosition::UpperRight);

        let series = surface.series();
        assert_eq!(series.len(), 2);
        match (&series[0], &series[1]) {
            (Series::Bars(attack), Series::Bars(block)) => {
                assert_eq!(attack.color, SKY_BLUE);
                assert_eq!(attack.label.as_deref(), Some(ATTACK_LABEL));
                assert_eq!(block.color, ORANGE);
                assert_eq!(block.label.as_deref(), Some(BLOCK_LABEL));
                assert_eq!(attack.bars.len(), block.bars.len());
                assert_eq!(attack.bars.iter().filter(|(_, v)| v.is_some()).count(), 10);
                assert_eq!(block.bars.iter().filter(|(_, v)| v.is_some()).count(), 10);
            }
            other => panic!("expected two bar series, got {other:?}"),
        }
    }

    #[test]
    fn test_first_category_is_best_attacker() {
        let surface = render(3);
        // BRA 12.6, FRA 11.9, NED 11.8 in the squad fixture
        assert_eq!(&surface.categories()[..3], ["BRA", "FRA", "NED"]);
    }
}
