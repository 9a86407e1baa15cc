//! Styling types shared by the canvas, the chart renderers and the figure

use plotters::style::RGBColor;
use vnl_common::{Result, VnlError};
use vnl_config::FigureConfig;

/// Matplotlib's `skyblue`
pub const SKY_BLUE: RGBColor = RGBColor(0x87, 0xCE, 0xEB);
/// Matplotlib's `orange`
pub const ORANGE: RGBColor = RGBColor(0xFF, 0xA5, 0x00);
/// Matplotlib's `lightgreen`
pub const LIGHT_GREEN: RGBColor = RGBColor(0x90, 0xEE, 0x90);
/// Plain black for lines, edges and text
pub const INK: RGBColor = RGBColor(0, 0, 0);
/// Legend box fill
pub const LEGEND_BACKGROUND: RGBColor = RGBColor(0xF8, 0xF8, 0xF8);

/// Seaborn's `pastel` palette, cycled for pie wedges
pub const PASTEL: [RGBColor; 10] = [
    RGBColor(0xa1, 0xc9, 0xf4), // Blue
    RGBColor(0xff, 0xb4, 0x82), // Orange
    RGBColor(0x8d, 0xe5, 0xa1), // Green
    RGBColor(0xff, 0x9f, 0x9b), // Red
    RGBColor(0xd0, 0xbb, 0xff), // Purple
    RGBColor(0xde, 0xbb, 0x9b), // Brown
    RGBColor(0xfa, 0xb0, 0xe4), // Pink
    RGBColor(0xcf, 0xcf, 0xcf), // Gray
    RGBColor(0xff, 0xfe, 0xa3), // Yellow
    RGBColor(0xb9, 0xf2, 0xf0), // Cyan
];

/// Parse a `#RRGGBB` string into a color
pub fn parse_color(color: &str) -> Result<RGBColor> {
    let invalid =
        || VnlError::validation_field(format!("'{color}' is not a #RRGGBB color"), "color");

    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(RGBColor(r, g, b)),
        _ => Err(invalid()),
    }
}

/// Text size in pixels plus weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSpec {
    /// Height in pixels
    pub size_px: f64,
    /// Bold weight
    pub bold: bool,
}

impl TextSpec {
    /// Regular weight text
    pub fn regular(size_px: f64) -> Self {
        Self {
            size_px,
            bold: false,
        }
    }

    /// Bold text
    pub fn bold(size_px: f64) -> Self {
        Self {
            size_px,
            bold: true,
        }
    }
}

/// Stroke pattern for grid lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Continuous line
    Solid,
    /// Evenly spaced dashes
    Dashed,
}

/// Which value axis the grid lines follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Vertical lines at the x ticks
    X,
    /// Horizontal lines at the y ticks
    Y,
    /// Lines at both axes' ticks
    Both,
}

/// Grid line configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Axis whose ticks the lines follow
    pub axis: GridAxis,
    /// Stroke pattern
    pub style: LineStyle,
    /// Line opacity
    pub alpha: f64,
}

impl GridSpec {
    /// Dashed grid at 70% opacity, the look used by every cartesian chart
    pub fn dashed(axis: GridAxis) -> Self {
        Self {
            axis,
            style: LineStyle::Dashed,
            alpha: 0.7,
        }
    }
}

/// Where a legend is anchored inside its panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    /// Inside the plot, top right corner
    UpperRight,
    /// Outside the plot, vertically centred on its right edge
    CenterRight,
}

/// Legend configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LegendSpec {
    /// Anchor
    pub position: LegendPosition,
    /// Heading drawn above the entries
    pub title: Option<String>,
    /// Entry text
    pub text: TextSpec,
}

/// Pixel sizes every chart renderer needs, derived from the figure settings
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Chart title
    pub title: TextSpec,
    /// Axis descriptions
    pub axis_label: TextSpec,
    /// Tick label size in pixels
    pub tick_px: f64,
    /// Legend entries
    pub legend: TextSpec,
    /// Plot area fill
    pub panel_background: RGBColor,
}

impl ChartStyle {
    /// Convert the point sizes and colors in `figure` to a chart style
    pub fn from_figure(figure: &FigureConfig) -> Result<Self> {
        let px = |points: u32| f64::from(figure.points_to_px(points));

        Ok(Self {
            title: TextSpec::bold(px(figure.fonts.chart_title)),
            axis_label: TextSpec::regular(px(figure.fonts.axis_label)),
            tick_px: px(figure.fonts.tick),
            legend: TextSpec::regular(px(figure.fonts.legend)),
            panel_background: parse_color(&figure.panel_background_color)?,
        })
    }
}

/// Figure-level layout and styling
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    /// Canvas width
    pub width_px: u32,
    /// Canvas height
    pub height_px: u32,
    /// Share of the width given to the chart grid
    pub grid_fraction: f64,
    /// Font family of every text element
    pub font_family: String,
    /// Figure fill
    pub background: RGBColor,
    /// Figure title
    pub title: TextSpec,
    /// Side panel text
    pub description: TextSpec,
    /// Style shared by the four panels
    pub chart: ChartStyle,
}

impl FigureStyle {
    /// Derive pixel sizes and colors from the figure settings
    pub fn from_config(figure: &FigureConfig) -> Result<Self> {
        let (width_px, height_px) = figure.pixel_size();
        let px = |points: u32| f64::from(figure.points_to_px(points));

        Ok(Self {
            width_px,
            height_px,
            grid_fraction: figure.grid_fraction,
            font_family: figure.font_family.clone(),
            background: parse_color(&figure.background_color)?,
            title: TextSpec::bold(px(figure.fonts.figure_title)),
            description: TextSpec::regular(px(figure.fonts.description)),
            chart: ChartStyle::from_figure(figure)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#87CEEB").unwrap(), SKY_BLUE);
        assert_eq!(parse_color("#ffa500").unwrap(), ORANGE);
        assert!(parse_color("87CEEB").is_err());
        assert!(parse_color("#87CEE").is_err());
        assert!(parse_color("#GG0000").is_err());
        assert!(parse_color("#ééé").is_err());
    }

    #[test]
    fn test_chart_style_scales_with_dpi() {
        let mut figure = FigureConfig::default();
        figure.dpi = 72;

        let style = ChartStyle::from_figure(&figure).unwrap();
        assert_eq!(style.title, TextSpec::bold(20.0));
        assert_eq!(style.axis_label.size_px, 18.0);
        assert_eq!(style.tick_px, 16.0);
        assert_eq!(style.panel_background, RGBColor(0xF0, 0xF0, 0xF0));

        figure.dpi = 144;
        let style = ChartStyle::from_figure(&figure).unwrap();
        assert_eq!(style.legend.size_px, 32.0);
    }

    #[test]
    fn test_figure_style_defaults() {
        let style = FigureStyle::from_config(&FigureConfig::default()).unwrap();
        assert_eq!((style.width_px, style.height_px), (2600, 1300));
        assert!(style.title.bold);
        assert_eq!(style.description.size_px, 25.0);
        assert_eq!(style.chart.tick_px, 22.0);
    }

    #[test]
    fn test_bad_background_is_rejected() {
        let mut figure = FigureConfig::default();
        figure.background_color = "grey".to_string();
        assert!(FigureStyle::from_config(&figure).is_err());
    }
}
