//! Retained-mode drawing surface the chart renderers draw into.
//!
//! A [`Surface`] only records what a renderer asks for. The figure later
//! draws every surface onto its slice of a plotters drawing area, so the
//! same recorded panel renders to a bitmap or to SVG.

use crate::types::{
    GridAxis, GridSpec, LegendPosition, LegendSpec, LineStyle, TextSpec, INK, LEGEND_BACKGROUND,
};
use plotters::coord::ranged1d::Ranged;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use vnl_common::{Result, VnlError};

/// Maximum number of tick labels per value axis
const AXIS_LABELS: usize = 10;

/// Share of each category slot covered by a horizontal bar
const BAR_THICKNESS: f64 = 0.8;

/// Dashes drawn along one grid line
const GRID_DASHES: usize = 60;

/// Matplotlib's default grid color
const GRID_COLOR: RGBColor = RGBColor(0xB0, 0xB0, 0xB0);

/// Operations a chart renderer may perform on its panel
pub trait Canvas {
    /// Set the panel title
    fn set_title(&mut self, title: &str, text: TextSpec);

    /// Set the axis descriptions; `None` leaves an axis undescribed
    fn set_axis_labels(&mut self, x: Option<&str>, y: Option<&str>, text: TextSpec);

    /// Fill color behind the panel
    fn set_background(&mut self, color: RGBColor);

    /// Enable grid lines
    fn set_grid(&mut self, grid: GridSpec);

    /// Tick label size in pixels
    fn set_tick_font_size(&mut self, size_px: f64);

    /// Add a data series; fails when the series cannot share the panel with
    /// the series already drawn
    fn draw_series(&mut self, series: Series) -> Result<()>;

    /// Show a legend for the labelled series
    fn add_legend(&mut self, legend: LegendSpec);
}

/// A polyline, optionally with circle markers at each point
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeriesSpec {
    /// Legend entry, if any
    pub label: Option<String>,
    /// Points in drawing order
    pub points: Vec<(f64, f64)>,
    /// Line color
    pub color: RGBColor,
    /// Stroke width in pixels
    pub width: u32,
    /// Draw a circle at each point
    pub markers: bool,
}

/// Horizontal bars on a category axis; a `None` value leaves the slot empty
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeriesSpec {
    /// Legend entry, if any
    pub label: Option<String>,
    /// Category and bar length; `None` leaves the slot empty
    pub bars: Vec<(String, Option<f64>)>,
    /// Bar fill
    pub color: RGBColor,
}

/// Adjacent bars spanning `(lower, upper)` with the given height
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeriesSpec {
    /// Legend entry, if any
    pub label: Option<String>,
    /// `(lower, upper, height)` per bin
    pub bins: Vec<(f64, f64, f64)>,
    /// Bar fill
    pub fill: RGBColor,
    /// Fill opacity
    pub alpha: f64,
    /// Bar outline
    pub edge: RGBColor,
}

/// One pie wedge
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Wedge and legend label
    pub label: String,
    /// Relative size
    pub value: f64,
    /// Wedge fill
    pub color: RGBColor,
}

/// Pie chart, wedges laid out counter-clockwise from `start_angle` degrees
#[derive(Debug, Clone, PartialEq)]
pub struct PieSeriesSpec {
    /// Wedges in counter-clockwise order
    pub slices: Vec<PieSlice>,
    /// Degrees counter-clockwise from three o'clock
    pub start_angle: f64,
    /// Wedge labels sit at this multiple of the radius
    pub label_distance: f64,
    /// Percentage labels sit at this multiple of the radius
    pub percent_distance: f64,
    /// Decimals of the percentage labels
    pub percent_decimals: usize,
    /// Label size
    pub text: TextSpec,
}

/// Data series a surface can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// Connected points
    Line(LineSeriesSpec),
    /// Horizontal bars over categories
    Bars(BarSeriesSpec),
    /// Adjacent bins
    Histogram(HistogramSeriesSpec),
    /// Pie with its wedge labels
    Pie(PieSeriesSpec),
}

/// Coordinate system a surface draws with, decided by its series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// No series yet
    Empty,
    /// Numeric x and y
    Cartesian,
    /// Numeric x, one category per y slot
    Categorical,
    /// Pie chart, no axes
    Polar,
}

impl Series {
    /// Layout this series needs
    pub fn layout(&self) -> Layout {
        match self {
            Self::Line(_) | Self::Histogram(_) => Layout::Cartesian,
            Self::Bars(_) => Layout::Categorical,
            Self::Pie(_) => Layout::Polar,
        }
    }

    /// Legend label, if any
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Line(s) => s.label.as_deref(),
            Self::Bars(s) => s.label.as_deref(),
            Self::Histogram(s) => s.label.as_deref(),
            Self::Pie(_) => None,
        }
    }
}

/// Recorded chart panel
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    font_family: String,
    title: Option<(String, TextSpec)>,
    x_label: Option<String>,
    y_label: Option<String>,
    axis_text: TextSpec,
    background: Option<RGBColor>,
    grid: Option<GridSpec>,
    tick_px: f64,
    series: Vec<Series>,
    legend: Option<LegendSpec>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new("sans-serif")
    }
}

impl Canvas for Surface {
    fn set_title(&mut self, title: &str, text: TextSpec) {
        self.title = Some((title.to_string(), text));
    }

    fn set_axis_labels(&mut self, x: Option<&str>, y: Option<&str>, text: TextSpec) {
        self.x_label = x.map(str::to_string);
        self.y_label = y.map(str::to_string);
        self.axis_text = text;
    }

    fn set_background(&mut self, color: RGBColor) {
        self.background = Some(color);
    }

    fn set_grid(&mut self, grid: GridSpec) {
        self.grid = Some(grid);
    }

    fn set_tick_font_size(&mut self, size_px: f64) {
        self.tick_px = size_px;
    }

    fn draw_series(&mut self, series: Series) -> Result<()> {
        let current = self.layout();
        let wanted = series.layout();
        if current != Layout::Empty && current != wanted {
            return Err(VnlError::graph(format!(
                "Cannot add a {wanted:?} series to a {current:?} panel"
            )));
        }
        if wanted == Layout::Polar && current == Layout::Polar {
            return Err(VnlError::graph("A panel holds at most one pie"));
        }

        self.series.push(series);
        Ok(())
    }

    fn add_legend(&mut self, legend: LegendSpec) {
        self.legend = Some(legend);
    }
}

impl Surface {
    /// Empty surface drawing text with `font_family`
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
            title: None,
            x_label: None,
            y_label: None,
            axis_text: TextSpec::regular(14.0),
            background: None,
            grid: None,
            tick_px: 12.0,
            series: Vec::new(),
            legend: None,
        }
    }

    /// Chart title
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().map(|(title, _)| title.as_str())
    }

    /// X and Y axis labels
    pub fn axis_labels(&self) -> (Option<&str>, Option<&str>) {
        (self.x_label.as_deref(), self.y_label.as_deref())
    }

    /// Panel background, if set
    pub fn background(&self) -> Option<RGBColor> {
        self.background
    }

    /// Grid configuration, if set
    pub fn grid(&self) -> Option<GridSpec> {
        self.grid
    }

    /// Tick label size in pixels
    pub fn tick_font_size(&self) -> f64 {
        self.tick_px
    }

    /// Series in drawing order
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Legend configuration, if set
    pub fn legend(&self) -> Option<&LegendSpec> {
        self.legend.as_ref()
    }

    /// Layout of the first series; every later series shares it
    pub fn layout(&self) -> Layout {
        self.series.first().map_or(Layout::Empty, Series::layout)
    }

    /// Categories of all bar series in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for series in &self.series {
            if let Series::Bars(bars) = series {
                for (category, _) in &bars.bars {
                    if !categories.contains(&category.as_str()) {
                        categories.push(category);
                    }
                }
            }
        }
        categories
    }

    /// Data ranges of the cartesian and categorical layouts, padded the way
    /// matplotlib pads autoscaled axes
    pub fn data_bounds(&self) -> (Range<f64>, Range<f64>) {
        let mut x = Extent::default();
        let mut y = Extent::default();
        let mut x_from_zero = false;
        let mut y_from_zero = false;

        for series in &self.series {
            match series {
                Series::Line(line) => {
                    for &(px, py) in &line.points {
                        x.include(px);
                        y.include(py);
                    }
                }
                Series::Histogram(hist) => {
                    y_from_zero = true;
                    y.include(0.0);
                    for &(lower, upper, height) in &hist.bins {
                        x.include(lower);
                        x.include(upper);
                        y.include(height);
                    }
                }
                Series::Bars(bars) => {
                    x_from_zero = true;
                    x.include(0.0);
                    for value in bars.bars.iter().filter_map(|(_, v)| *v) {
                        x.include(value);
                    }
                }
                Series::Pie(_) => {}
            }
        }

        let y_range = if self.layout() == Layout::Categorical {
            let slots = self.categories().len().max(1) as f64;
            -0.5..slots - 0.5
        } else {
            y.padded(y_from_zero)
        };
        (x.padded(x_from_zero), y_range)
    }

    fn font(&self, text: TextSpec) -> FontDesc<'_> {
        let font = (self.font_family.as_str(), text.size_px).into_font();
        if text.bold {
            font.style(FontStyle::Bold)
        } else {
            font
        }
    }

    /// Draw the recorded panel onto `area`
    pub fn draw<DB>(&self, area: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        if let Some(background) = self.background {
            area.fill(&background)?;
        }

        match self.layout() {
            Layout::Empty => {
                if let Some((title, text)) = &self.title {
                    area.titled(title, self.font(*text))?;
                }
                Ok(())
            }
            Layout::Cartesian | Layout::Categorical => self.draw_cartesian(area),
            Layout::Polar => self.draw_polar(area),
        }
    }

    fn draw_cartesian<DB>(&self, area: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let (x_range, y_range) = self.data_bounds();
        let categories = self.categories();
        let slots = categories.len();
        let categorical = self.layout() == Layout::Categorical;

        let (width, height) = area.dim_in_pixel();
        let margin = (f64::from(width.min(height)) * 0.03).round() as u32;
        let axis_px = self.axis_text.size_px;
        let x_label_area = (self.tick_px * 1.8 + axis_px * 1.8).round() as u32;
        let y_label_area = if categorical {
            let longest = categories.iter().map(|c| c.chars().count()).max().unwrap_or(1);
            (longest as f64 * self.tick_px * 0.65 + axis_px * 2.0).round() as u32
        } else {
            (self.tick_px * 3.5 + axis_px * 2.0).round() as u32
        };

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(margin)
            .x_label_area_size(x_label_area)
            .y_label_area_size(y_label_area);
        if let Some((title, text)) = &self.title {
            builder.caption(title.as_str(), self.font(*text));
        }
        let mut chart = builder.build_cartesian_2d(x_range.clone(), y_range.clone())?;

        // Category slot i sits at y = slots - 1 - i so the first category is on top
        let category_label = |y: &f64| {
            let slot = y.round();
            if (y - slot).abs() > 1e-6 || slot < 0.0 {
                return String::new();
            }
            (slot as usize)
                .checked_add(1)
                .and_then(|s| slots.checked_sub(s))
                .and_then(|i| categories.get(i))
                .map(|c| (*c).to_string())
                .unwrap_or_default()
        };

        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(AXIS_LABELS)
            .label_style(self.font(TextSpec::regular(self.tick_px)))
            .axis_desc_style(self.font(self.axis_text));
        if categorical {
            mesh.y_labels(slots.max(1)).y_label_formatter(&category_label);
        } else {
            mesh.y_labels(AXIS_LABELS);
        }
        if let Some(x) = &self.x_label {
            mesh.x_desc(x.as_str());
        }
        if let Some(y) = &self.y_label {
            mesh.y_desc(y.as_str());
        }
        mesh.draw()?;

        if let Some(grid) = self.grid {
            let coords = chart.as_coord_spec();
            let x_ticks = coords.x_spec().key_points(AXIS_LABELS);
            let y_ticks = if categorical {
                Vec::new()
            } else {
                coords.y_spec().key_points(AXIS_LABELS)
            };
            let lines = grid_lines(grid, &x_range, &y_range, &x_ticks, &y_ticks);
            let style = GRID_COLOR.mix(grid.alpha).stroke_width(1);
            chart.draw_series(lines.into_iter().map(|path| PathElement::new(path, style)))?;
        }

        let plot_height = chart.plotting_area().dim_in_pixel().1;
        for series in &self.series {
            match series {
                Series::Line(line) => {
                    let style = line.color.stroke_width(line.width);
                    let anno =
                        chart.draw_series(LineSeries::new(line.points.iter().copied(), style))?;
                    if let Some(label) = &line.label {
                        let (color, width) = (line.color, line.width);
                        anno.label(label.as_str()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
                        });
                    }
                    if line.markers {
                        let radius = line.width * 2 + 1;
                        let fill = line.color.filled();
                        chart.draw_series(
                            line.points.iter().map(|p| Circle::new(*p, radius, fill)),
                        )?;
                    }
                }
                Series::Histogram(hist) => {
                    let fill = hist.fill.mix(hist.alpha).filled();
                    let anno = chart.draw_series(hist.bins.iter().map(|&(lower, upper, height)| {
                        Rectangle::new([(lower, 0.0), (upper, height)], fill)
                    }))?;
                    if let Some(label) = &hist.label {
                        anno.label(label.as_str()).legend(move |(x, y)| {
                            Rectangle::new([(x, y - 6), (x + 16, y + 6)], fill)
                        });
                    }
                    let edge = hist.edge.stroke_width(1);
                    chart.draw_series(hist.bins.iter().map(|&(lower, upper, height)| {
                        Rectangle::new([(lower, 0.0), (upper, height)], edge)
                    }))?;
                }
                Series::Bars(bars) => {
                    let fill = bars.color.filled();
                    let half = BAR_THICKNESS / 2.0;
                    let anno = chart.draw_series(bars.bars.iter().filter_map(|(category, value)| {
                        let value = (*value)?;
                        let index = categories.iter().position(|c| *c == category.as_str())?;
                        let slot = (slots - 1 - index) as f64;
                        Some(Rectangle::new([(0.0, slot - half), (value, slot + half)], fill))
                    }))?;
                    if let Some(label) = &bars.label {
                        let marker = (f64::from(plot_height) / slots.max(1) as f64 * 0.3)
                            .clamp(4.0, 12.0) as i32;
                        anno.label(label.as_str()).legend(move |(x, y)| {
                            Rectangle::new([(x, y - marker), (x + 2 * marker, y + marker)], fill)
                        });
                    }
                }
                Series::Pie(_) => {}
            }
        }

        if let Some(legend) = &self.legend {
            if self.series.iter().any(|s| s.label().is_some()) {
                let position = match legend.position {
                    LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
                    LegendPosition::CenterRight => SeriesLabelPosition::MiddleRight,
                };
                chart
                    .configure_series_labels()
                    .position(position)
                    .label_font(self.font(legend.text))
                    .background_style(LEGEND_BACKGROUND.mix(0.8))
                    .border_style(INK.mix(0.2))
                    .draw()?;
            }
        }

        Ok(())
    }

    fn draw_polar<DB>(&self, area: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let area = match &self.title {
            Some((title, text)) => area.titled(title, self.font(*text))?,
            None => area.clone(),
        };

        let pie = self.series.iter().find_map(|s| match s {
            Series::Pie(pie) => Some(pie),
            _ => None,
        });
        let Some(pie) = pie else {
            return Ok(());
        };

        let (width, height) = area.dim_in_pixel();
        let legend_width = if self.legend.is_some() {
            f64::from(width) * 0.25
        } else {
            0.0
        };
        let pie_width = f64::from(width) - legend_width;
        let center = (pie_width / 2.0, f64::from(height) / 2.0);
        let radius = pie_width.min(f64::from(height)) / 2.0 / (pie.label_distance + 0.35);

        let label_style = self.font(pie.text).color(&INK);
        for wedge in pie_wedges(pie) {
            let polygon = wedge_polygon(center, radius, wedge.start, wedge.end);
            area.draw(&Polygon::new(polygon, wedge.color.filled()))?;

            let mid = (wedge.start + wedge.end) / 2.0;
            let (lx, ly) = polar_point(center, radius * pie.label_distance, mid);
            let anchor = if mid.to_radians().cos() >= 0.0 {
                HPos::Left
            } else {
                HPos::Right
            };
            area.draw(&Text::new(
                wedge.label.clone(),
                (lx, ly),
                label_style.pos(Pos::new(anchor, VPos::Center)),
            ))?;

            let (px, py) = polar_point(center, radius * pie.percent_distance, mid);
            area.draw(&Text::new(
                format!("{:.*}%", pie.percent_decimals, wedge.percentage),
                (px, py),
                label_style.pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
        }

        if let Some(legend) = &self.legend {
            let entries: Vec<(&str, RGBColor)> = pie
                .slices
                .iter()
                .map(|s| (s.label.as_str(), s.color))
                .collect();
            self.draw_side_legend(&area, legend, &entries, pie_width.round() as i32)?;
        }

        Ok(())
    }

    /// Boxed legend drawn to the right of `left`, vertically centred
    fn draw_side_legend<DB>(
        &self,
        area: &DrawingArea<DB, Shift>,
        legend: &LegendSpec,
        entries: &[(&str, RGBColor)],
        left: i32,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let size = legend.text.size_px;
        let text_style = self.font(legend.text).color(&INK);
        let title_style = self.font(TextSpec::bold(size)).color(&INK);
        let line_height = (size * 1.5).round() as i32;
        let swatch = (size * 0.8).round() as i32;
        let padding = (size * 0.5).round() as i32;

        let mut text_width = 0;
        if let Some(title) = &legend.title {
            text_width = area.estimate_text_size(title, &title_style)?.0 as i32;
        }
        for (label, _) in entries {
            let (w, _) = area.estimate_text_size(label, &text_style)?;
            text_width = text_width.max(w as i32 + swatch + padding);
        }

        let rows = entries.len() as i32 + i32::from(legend.title.is_some());
        let box_height = rows * line_height + 2 * padding;
        let top = area.dim_in_pixel().1 as i32 / 2 - box_height / 2;
        let right = left + text_width + 2 * padding;

        area.draw(&Rectangle::new(
            [(left, top), (right, top + box_height)],
            LEGEND_BACKGROUND.filled(),
        ))?;
        area.draw(&Rectangle::new(
            [(left, top), (right, top + box_height)],
            INK.mix(0.2).stroke_width(1),
        ))?;

        let mut y = top + padding + line_height / 2;
        if let Some(title) = &legend.title {
            area.draw(&Text::new(
                title.clone(),
                ((left + right) / 2, y),
                title_style.pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
            y += line_height;
        }
        for (label, color) in entries {
            let x = left + padding;
            area.draw(&Rectangle::new(
                [(x, y - swatch / 2), (x + swatch, y + swatch / 2)],
                color.filled(),
            ))?;
            area.draw(&Text::new(
                (*label).to_string(),
                (x + swatch + padding / 2, y),
                text_style.pos(Pos::new(HPos::Left, VPos::Center)),
            ))?;
            y += line_height;
        }

        Ok(())
    }
}

/// Running min/max of one axis
#[derive(Debug, Default)]
struct Extent {
    bounds: Option<(f64, f64)>,
}

impl Extent {
    fn include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.bounds = Some(match self.bounds {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
    }

    /// 5% padding on both ends, or only above a zero baseline
    fn padded(&self, from_zero: bool) -> Range<f64> {
        let Some((lo, hi)) = self.bounds else {
            return 0.0..1.0;
        };
        let span = if hi > lo { hi - lo } else { 1.0 };
        let pad = span * 0.05;

        if from_zero && lo >= 0.0 {
            lo..hi + pad.max(if hi > lo { 0.0 } else { 1.0 })
        } else if hi > lo {
            lo - pad..hi + pad
        } else {
            lo - 1.0..hi + 1.0
        }
    }
}

/// Straight or dashed grid lines through the tick positions, in data
/// coordinates
fn grid_lines(
    grid: GridSpec,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
    x_ticks: &[f64],
    y_ticks: &[f64],
) -> Vec<Vec<(f64, f64)>> {
    let mut lines = Vec::new();

    if matches!(grid.axis, GridAxis::X | GridAxis::Both) {
        for &x in x_ticks {
            lines.extend(stroke((x, y_range.start), (x, y_range.end), grid.style));
        }
    }
    if matches!(grid.axis, GridAxis::Y | GridAxis::Both) {
        for &y in y_ticks {
            lines.extend(stroke((x_range.start, y), (x_range.end, y), grid.style));
        }
    }
    lines
}

fn stroke(from: (f64, f64), to: (f64, f64), style: LineStyle) -> Vec<Vec<(f64, f64)>> {
    match style {
        LineStyle::Solid => vec![vec![from, to]],
        LineStyle::Dashed => dash_segments(from, to, GRID_DASHES),
    }
}

/// Split the segment `from -> to` into `dashes` dashes with equal gaps
pub(crate) fn dash_segments(
    from: (f64, f64),
    to: (f64, f64),
    dashes: usize,
) -> Vec<Vec<(f64, f64)>> {
    let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    let period = 1.0 / dashes as f64;

    (0..dashes)
        .map(|i| {
            let start = i as f64 * period;
            vec![lerp(start), lerp(start + period * 0.6)]
        })
        .collect()
}

/// Angular extent of one wedge, degrees counter-clockwise from the x axis
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Wedge {
    pub label: String,
    pub color: RGBColor,
    pub start: f64,
    pub end: f64,
    pub percentage: f64,
}

pub(crate) fn pie_wedges(pie: &PieSeriesSpec) -> Vec<Wedge> {
    let total: f64 = pie.slices.iter().map(|s| s.value.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = pie.start_angle;
    pie.slices
        .iter()
        .map(|slice| {
            let share = slice.value.max(0.0) / total;
            let start = angle;
            angle += share * 360.0;
            Wedge {
                label: slice.label.clone(),
                color: slice.color,
                start,
                end: angle,
                percentage: share * 100.0,
            }
        })
        .collect()
}

/// Pixel position at `angle` degrees on a circle; y grows downwards
fn polar_point(center: (f64, f64), radius: f64, angle: f64) -> (i32, i32) {
    let theta = angle.to_radians();
    (
        (center.0 + radius * theta.cos()).round() as i32,
        (center.1 - radius * theta.sin()).round() as i32,
    )
}

fn wedge_polygon(center: (f64, f64), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    let steps = ((end - start) / 2.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push((center.0.round() as i32, center.1.round() as i32));
    for i in 0..=steps {
        let angle = start + (end - start) * i as f64 / steps as f64;
        points.push(polar_point(center, radius, angle));
    }
    points
}

/// Whether text in `family` can be measured, i.e. the font resolves on this system
pub fn font_available(family: &str) -> bool {
    (family, 12.0).into_font().box_size("x").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GridSpec, ORANGE, PASTEL, SKY_BLUE};
    use vnl_common::test_utils::assert_approx_eq;

    fn line(points: Vec<(f64, f64)>) -> Series {
        Series::Line(LineSeriesSpec {
            label: Some("Line".to_string()),
            points,
            color: INK,
            width: 2,
            markers: true,
        })
    }

    fn bars(label: &str, bars: &[(&str, Option<f64>)], color: RGBColor) -> Series {
        Series::Bars(BarSeriesSpec {
            label: Some(label.to_string()),
            bars: bars.iter().map(|(c, v)| ((*c).to_string(), *v)).collect(),
            color,
        })
    }

    fn pie(values: &[f64]) -> Series {
        Series::Pie(PieSeriesSpec {
            slices: values
                .iter()
                .enumerate()
                .map(|(i, v)| PieSlice {
                    label: format!("P{i}"),
                    value: *v,
                    color: PASTEL[i % PASTEL.len()],
                })
                .collect(),
            start_angle: 140.0,
            label_distance: 1.1,
            percent_distance: 0.6,
            percent_decimals: 2,
            text: TextSpec::regular(12.0),
        })
    }

    #[test]
    fn test_surface_records_configuration() {
        let mut surface = Surface::new("serif");
        surface.set_title("Title", TextSpec::bold(20.0));
        surface.set_axis_labels(Some("Age"), None, TextSpec::regular(18.0));
        surface.set_background(RGBColor(1, 2, 3));
        surface.set_grid(GridSpec::dashed(GridAxis::Y));
        surface.set_tick_font_size(16.0);

        assert_eq!(surface.title(), Some("Title"));
        assert_eq!(surface.axis_labels(), (Some("Age"), None));
        assert_eq!(surface.background(), Some(RGBColor(1, 2, 3)));
        assert_eq!(surface.grid().unwrap().style, LineStyle::Dashed);
        assert_eq!(surface.tick_font_size(), 16.0);
        assert_eq!(surface.layout(), Layout::Empty);
    }

    #[test]
    fn test_layout_follows_series() {
        let mut surface = Surface::default();
        surface.draw_series(line(vec![(0.0, 1.0)])).unwrap();
        assert_eq!(surface.layout(), Layout::Cartesian);

        let mut surface = Surface::default();
        surface.draw_series(pie(&[1.0, 2.0])).unwrap();
        assert_eq!(surface.layout(), Layout::Polar);
    }

    #[test]
    fn test_mixing_pie_with_cartesian_is_an_error() {
        let mut surface = Surface::default();
        surface.draw_series(line(vec![(0.0, 1.0)])).unwrap();
        let err = surface.draw_series(pie(&[1.0])).unwrap_err();
        assert!(matches!(err, VnlError::Graph { .. }));

        let mut surface = Surface::default();
        surface.draw_series(pie(&[1.0])).unwrap();
        assert!(surface.draw_series(line(vec![(0.0, 1.0)])).is_err());
        assert!(surface.draw_series(pie(&[1.0])).is_err());
        assert_eq!(surface.series().len(), 1);
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let mut surface = Surface::default();
        surface
            .draw_series(bars(
                "Attack",
                &[("FRA", Some(9.0)), ("JPN", Some(7.0)), ("POL", None)],
                SKY_BLUE,
            ))
            .unwrap();
        surface
            .draw_series(bars(
                "Block",
                &[
                    ("FRA", None),
                    ("JPN", Some(2.0)),
                    ("POL", Some(3.0)),
                    ("ITA", Some(1.0)),
                ],
                ORANGE,
            ))
            .unwrap();

        assert_eq!(surface.categories(), ["FRA", "JPN", "POL", "ITA"]);

        let (x, y) = surface.data_bounds();
        assert_eq!(x.start, 0.0);
        assert_approx_eq(x.end, 9.45, 1e-9);
        assert_eq!(y, -0.5..3.5);
    }

    #[test]
    fn test_cartesian_bounds_padding() {
        let mut surface = Surface::default();
        surface.draw_series(line(vec![(20.0, 10.0), (30.0, 20.0)])).unwrap();
        let (x, y) = surface.data_bounds();
        assert_approx_eq(x.start, 19.5, 1e-9);
        assert_approx_eq(x.end, 30.5, 1e-9);
        assert_approx_eq(y.start, 9.5, 1e-9);
        assert_approx_eq(y.end, 20.5, 1e-9);

        // Histograms keep their zero baseline
        let mut surface = Surface::default();
        surface
            .draw_series(Series::Histogram(HistogramSeriesSpec {
                label: None,
                bins: vec![(18.0, 19.0, 4.0), (19.0, 20.0, 10.0)],
                fill: INK,
                alpha: 0.7,
                edge: INK,
            }))
            .unwrap();
        let (x, y) = surface.data_bounds();
        assert_approx_eq(x.start, 17.9, 1e-9);
        assert_eq!(y.start, 0.0);
        assert_approx_eq(y.end, 10.5, 1e-9);
    }

    #[test]
    fn test_degenerate_bounds() {
        let surface = Surface::default();
        assert_eq!(surface.data_bounds(), (0.0..1.0, 0.0..1.0));

        let mut surface = Surface::default();
        surface.draw_series(line(vec![(25.0, 40.0)])).unwrap();
        assert_eq!(surface.data_bounds(), (24.0..26.0, 39.0..41.0));
    }

    #[test]
    fn test_dash_segments() {
        let dashes = dash_segments((0.0, 5.0), (10.0, 5.0), 5);
        assert_eq!(dashes.len(), 5);
        assert_eq!(dashes[0][0], (0.0, 5.0));
        assert_approx_eq(dashes[0][1].0, 1.2, 1e-12);
        assert_eq!(dashes[0][1].1, 5.0);
        assert_approx_eq(dashes[4][0].0, 8.0, 1e-12);
        assert!(dashes.iter().all(|d| d[1].0 <= 10.0));
    }

    #[test]
    fn test_grid_lines_follow_axis() {
        let y_grid = grid_lines(
            GridSpec::dashed(GridAxis::Y),
            &(0.0..10.0),
            &(0.0..4.0),
            &[0.0, 5.0, 10.0],
            &[1.0, 2.0],
        );
        assert_eq!(y_grid.len(), 2 * GRID_DASHES);
        assert!(y_grid.iter().all(|d| d[0].1 == d[1].1));

        let solid = GridSpec {
            axis: GridAxis::Both,
            style: LineStyle::Solid,
            alpha: 1.0,
        };
        assert_eq!(grid_lines(solid, &(0.0..1.0), &(0.0..1.0), &[0.5], &[0.5]).len(), 2);
    }

    #[test]
    fn test_pie_wedges_are_counter_clockwise_from_start() {
        let Series::Pie(spec) = pie(&[2.0, 1.0, 1.0]) else {
            unreachable!()
        };
        let wedges = pie_wedges(&spec);

        assert_eq!(wedges.len(), 3);
        assert_eq!(wedges[0].start, 140.0);
        assert_approx_eq(wedges[0].end, 320.0, 1e-9);
        assert_approx_eq(wedges[2].end, 500.0, 1e-9);
        assert_approx_eq(wedges[0].percentage, 50.0, 1e-9);
        assert_approx_eq(wedges.iter().map(|w| w.percentage).sum::<f64>(), 100.0, 1e-9);

        let Series::Pie(empty) = pie(&[0.0]) else {
            unreachable!()
        };
        assert!(pie_wedges(&empty).is_empty());
    }

    #[test]
    fn test_polar_point_orientation() {
        // 90 degrees points up, which is towards smaller pixel y
        assert_eq!(polar_point((100.0, 100.0), 10.0, 90.0), (100, 90));
        assert_eq!(polar_point((100.0, 100.0), 10.0, 180.0), (90, 100));

        let polygon = wedge_polygon((0.0, 0.0), 10.0, 0.0, 90.0);
        assert_eq!(polygon[0], (0, 0));
        assert_eq!(polygon[1], (10, 0));
        assert_eq!(*polygon.last().unwrap(), (0, -10));
    }

    #[test]
    fn test_surfaces_render_to_svg() {
        if !font_available("sans-serif") {
            return;
        }

        let mut cartesian = Surface::default();
        cartesian.set_title("Line", TextSpec::bold(16.0));
        cartesian.set_axis_labels(Some("Age"), Some("Score"), TextSpec::regular(12.0));
        cartesian.set_grid(GridSpec::dashed(GridAxis::Y));
        cartesian.draw_series(line(vec![(20.0, 1.0), (21.0, 3.0)])).unwrap();
        cartesian.add_legend(LegendSpec {
            position: LegendPosition::UpperRight,
            title: None,
            text: TextSpec::regular(10.0),
        });

        let mut polar = Surface::default();
        polar.set_title("Pie", TextSpec::bold(16.0));
        polar.draw_series(pie(&[3.0, 2.0, 1.0])).unwrap();
        polar.add_legend(LegendSpec {
            position: LegendPosition::CenterRight,
            title: Some("Positions".to_string()),
            text: TextSpec::regular(10.0),
        });

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (800, 400)).into_drawing_area();
            let (left, right) = root.split_horizontally(400);
            cartesian.draw(&left).unwrap();
            polar.draw(&right).unwrap();
            root.present().unwrap();
        }

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Positions"));
        assert!(svg.contains("50.00%"));
    }
}
