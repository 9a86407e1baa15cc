//! Chart renderer trait

use crate::canvas::Canvas;
use crate::types::ChartStyle;
use vnl_common::Result;

/// Trait for chart renderers that turn an aggregated view into drawing
/// instructions on a canvas.
pub trait ChartRenderer {
    /// The view this renderer draws
    type View;

    /// Configure `canvas` to show `view`
    fn render(&self, view: &Self::View, canvas: &mut dyn Canvas, style: &ChartStyle) -> Result<()>;

    /// Gets the name of this chart type.
    fn name(&self) -> &'static str;

    /// Gets the description of this chart type.
    fn description(&self) -> &'static str;

    /// Apply the panel background and tick size shared by every chart
    fn apply_styling(&self, canvas: &mut dyn Canvas, style: &ChartStyle) {
        canvas.set_background(style.panel_background);
        canvas.set_tick_font_size(style.tick_px);
    }
}
