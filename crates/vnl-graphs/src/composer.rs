//! Figure composition: four chart panels, a title and the description panel

use crate::age_distribution::AgeDistributionChart;
use crate::aggregator::{
    AgeHistogram, AgeHistogramView, AttackByAgeView, DataAggregator, MeanAttackByAge,
    PositionCounts, PositionDistributionView, TopCountries, TopCountriesView,
};
use crate::attack_by_age::AttackByAgeChart;
use crate::canvas::Surface;
use crate::position_distribution::PositionPieChart;
use crate::renderer::ChartRenderer;
use crate::top_countries::TopCountriesChart;
use crate::types::{ChartStyle, FigureStyle, TextSpec, INK};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument};
use vnl_common::{Result, Table, VnlError};
use vnl_config::{ChartsConfig, Config, FigureConfig};

/// Text of the description panel beside the chart grid
pub const DESCRIPTION: &str = "\
Name       : Bharanidharan Thirumaran
Student ID : 22076992

This infographic shows the average attack and block scores, player position distribution,
and age distribution of players in volleyball.

Line Plot: Average Attack Score by Age
The attack score tends to peak around 25 years old.
Scores rise as players mature and decline for younger and older age groups.

Horizontal Bar Plot: Top 10 Countries - Average Attack and Block
France excels in attacking, while Japan stands out in blocking.
A mix of experienced and younger players dominate the top countries.

Pie Chart: Player Position Distribution
Outside hitters (OH) dominate the player positions at 32.10%.
Liberos (L) and setters (S) are the least common positions.

Histogram: Age Distribution of Players
The majority of players fall within the 17.5-20.0 age bracket.
A significant portion of players are also in the 15.0-17.5 and 20.0-22.5 age ranges.";

/// Position of a panel in the 2x2 chart grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridCell {
    /// Mean attack by age
    TopLeft,
    /// Top countries bars
    TopRight,
    /// Position pie
    BottomLeft,
    /// Age histogram
    BottomRight,
}

impl GridCell {
    /// Row-major order
    pub const ALL: [GridCell; 4] = [
        GridCell::TopLeft,
        GridCell::TopRight,
        GridCell::BottomLeft,
        GridCell::BottomRight,
    ];

    fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }
}

/// Encodings the figure can be rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics bitmap
    Png,
    /// Scalable Vector Graphics text
    Svg,
}

impl ImageFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            _ => Err(VnlError::validation_field(
                format!("Cannot infer an image format from {}", path.display()),
                "path",
            )),
        }
    }
}

/// The composed infographic
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    title: String,
    description: String,
    style: FigureStyle,
    surfaces: [Surface; 4],
}

impl Figure {
    /// Figure with four empty panels
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        style: FigureStyle,
    ) -> Self {
        let surfaces = std::array::from_fn(|_| Surface::new(style.font_family.clone()));
        Self {
            title: title.into(),
            description: description.into(),
            style,
            surfaces,
        }
    }

    /// Figure title drawn above the grid
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text of the side panel
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Figure-level styling
    pub fn style(&self) -> &FigureStyle {
        &self.style
    }

    /// Panel at `cell`
    pub fn surface(&self, cell: GridCell) -> &Surface {
        &self.surfaces[cell.index()]
    }

    /// Mutable panel at `cell`
    pub fn surface_mut(&mut self, cell: GridCell) -> &mut Surface {
        &mut self.surfaces[cell.index()]
    }

    fn font(&self, text: TextSpec) -> TextStyle<'_> {
        let font = (self.style.font_family.as_str(), text.size_px).into_font();
        let font = if text.bold {
            font.style(FontStyle::Bold)
        } else {
            font
        };
        font.color(&INK)
    }

    /// Draw the whole figure onto `root`
    pub fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&self.style.background)?;
        let (width, _) = root.dim_in_pixel();

        let title_height = (self.style.title.size_px * 2.2).round() as u32;
        let (header, body) = root.split_vertically(title_height);
        header.draw(&Text::new(
            self.title.clone(),
            ((width / 2) as i32, (title_height / 2) as i32),
            self.font(self.style.title)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;

        let grid_width = (f64::from(width) * self.style.grid_fraction).round() as u32;
        let (grid, panel) = body.split_horizontally(grid_width);
        let gap = (f64::from(grid_width) * 0.01).round() as u32;

        for (cell, area) in GridCell::ALL.iter().zip(grid.split_evenly((2, 2))) {
            let area = area.margin(gap, gap, gap, gap);
            self.surface(*cell).draw(&area)?;
        }

        if self.style.grid_fraction < 1.0 {
            self.draw_description(&panel)?;
        }
        Ok(())
    }

    fn draw_description<DB>(&self, panel: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let style = self.font(self.style.description);
        let (width, height) = panel.dim_in_pixel();
        let size = self.style.description.size_px;
        let padding = (size * 0.8).round() as i32;
        let max_width = width as i32 - 2 * padding;

        let mut lines = Vec::new();
        for line in self.description.lines() {
            lines.extend(wrap_line(line, max_width, |text| {
                panel.estimate_text_size(text, &style).map(|(w, _)| w as i32)
            })?);
        }

        let line_height = (size * 1.3).round() as i32;
        let top = height as i32 / 2 - line_height * lines.len() as i32 / 2;
        let left_aligned = style.pos(Pos::new(HPos::Left, VPos::Center));
        for (i, line) in lines.into_iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = top + line_height * i as i32 + line_height / 2;
            panel.draw(&Text::new(line, (padding, y), left_aligned.clone()))?;
        }
        Ok(())
    }

    /// Render the figure in memory
    pub fn render_to_bytes(&self, format: ImageFormat) -> Result<Vec<u8>> {
        let (width, height) = (self.style.width_px, self.style.height_px);

        match format {
            ImageFormat::Png => {
                let mut pixels = vec![0u8; width as usize * height as usize * 3];
                {
                    let root = BitMapBackend::with_buffer(&mut pixels, (width, height))
                        .into_drawing_area();
                    self.draw(&root)?;
                    root.present()?;
                }

                let mut png = Vec::new();
                PngEncoder::new(&mut png).write_image(&pixels, width, height, ColorType::Rgb8)?;
                Ok(png)
            }
            ImageFormat::Svg => {
                let mut svg = String::new();
                {
                    let root =
                        SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
                    self.draw(&root)?;
                    root.present()?;
                }
                Ok(svg.into_bytes())
            }
        }
    }

    /// Render and write the figure, picking PNG or SVG from the extension
    pub fn render_to_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let bytes = self.render_to_bytes(format)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &bytes)?;

        info!(bytes = bytes.len(), "Saved figure to {}", path.display());
        Ok(bytes.len())
    }
}

/// Break `line` into pieces no wider than `max_width`, splitting at spaces.
/// A line that already fits is kept verbatim, inner spacing included.
fn wrap_line<E>(
    line: &str,
    max_width: i32,
    mut measure: impl FnMut(&str) -> std::result::Result<i32, E>,
) -> std::result::Result<Vec<String>, E> {
    if line.trim().is_empty() {
        return Ok(vec![String::new()]);
    }
    if measure(line)? <= max_width {
        return Ok(vec![line.to_string()]);
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate)? <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Every aggregated view behind the figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfographicSummary {
    /// Rows in the input table
    pub rows: usize,
    /// Mean attack per age
    pub attack_by_age: AttackByAgeView,
    /// Top countries by attack and block
    pub top_countries: TopCountriesView,
    /// Count and share per position
    pub position_distribution: PositionDistributionView,
    /// Binned ages with the density curve
    pub age_histogram: AgeHistogramView,
}

impl InfographicSummary {
    /// Pretty printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON summary to `path`
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        info!("Wrote summary to {}", path.display());
        Ok(())
    }
}

/// Runs each aggregator and renderer pair into its grid cell
#[derive(Debug, Clone)]
pub struct InfographicComposer {
    figure: FigureConfig,
    charts: ChartsConfig,
}

impl InfographicComposer {
    /// Composer using the figure and chart settings of `config`
    pub fn new(config: &Config) -> Self {
        Self::with_settings(config.figure.clone(), config.charts.clone())
    }

    /// Composer from explicit figure and chart settings
    pub fn with_settings(figure: FigureConfig, charts: ChartsConfig) -> Self {
        Self { figure, charts }
    }

    /// Build the figure from `table`.
    ///
    /// Panels are filled in a fixed order: attack by age (top left), top
    /// countries (top right), positions (bottom left), ages (bottom right).
    #[instrument(skip_all, fields(rows = table.len()))]
    pub fn compose(&self, table: &Table) -> Result<(Figure, InfographicSummary)> {
        let style = FigureStyle::from_config(&self.figure)?;
        let chart_style = style.chart.clone();
        let mut figure = Figure::new(self.figure.title.clone(), DESCRIPTION, style);

        let attack_by_age = MeanAttackByAge.aggregate(table)?;
        render_into(
            &AttackByAgeChart,
            &attack_by_age,
            figure.surface_mut(GridCell::TopLeft),
            &chart_style,
        )?;

        let top_countries = TopCountries::new(self.charts.top_countries).aggregate(table)?;
        render_into(
            &TopCountriesChart,
            &top_countries,
            figure.surface_mut(GridCell::TopRight),
            &chart_style,
        )?;

        let position_distribution = PositionCounts.aggregate(table)?;
        render_into(
            &PositionPieChart,
            &position_distribution,
            figure.surface_mut(GridCell::BottomLeft),
            &chart_style,
        )?;

        let age_histogram = AgeHistogram::new(self.charts.histogram_bins).aggregate(table)?;
        render_into(
            &AgeDistributionChart,
            &age_histogram,
            figure.surface_mut(GridCell::BottomRight),
            &chart_style,
        )?;

        info!("Composed infographic from {} rows", table.len());
        let summary = InfographicSummary {
            rows: table.len(),
            attack_by_age,
            top_countries,
            position_distribution,
            age_histogram,
        };
        Ok((figure, summary))
    }
}

fn render_into<R: ChartRenderer>(
    renderer: &R,
    view: &R::View,
    surface: &mut Surface,
    style: &ChartStyle,
) -> Result<()> {
    debug!(chart = renderer.name(), "Rendering panel");
    renderer.render(view, surface, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{font_available, Layout};
    use std::collections::BTreeMap;
    use std::convert::Infallible;
    use tempfile::TempDir;
    use vnl_common::test_utils::{init_test_logging, table_fixtures};

    fn small_composer() -> InfographicComposer {
        let figure = FigureConfig {
            width_in: 12.0,
            height_in: 6.0,
            dpi: 50,
            ..FigureConfig::default()
        };
        InfographicComposer::with_settings(figure, ChartsConfig::default())
    }

    #[test]
    fn test_compose_fills_cells_in_order() {
        init_test_logging();
        let composer = InfographicComposer::new(&Config::default());
        let (figure, summary) = composer.compose(&table_fixtures::three_players()).unwrap();

        assert_eq!(figure.title(), "Player Statistics Analysis");
        assert_eq!(figure.description(), DESCRIPTION);

        let titles: Vec<_> = GridCell::ALL
            .iter()
            .map(|cell| figure.surface(*cell).title().unwrap_or_default())
            .collect();
        assert_eq!(
            titles,
            [
                "Average Attack Score by Age",
                "Top 10 Countries: Average Attack and Block",
                "Player Position Distribution",
                "Age Distribution of Players",
            ]
        );
        assert_eq!(figure.surface(GridCell::BottomLeft).layout(), Layout::Polar);
        assert_eq!(summary.rows, 3);
    }

    #[test]
    fn test_three_player_summary() {
        #[derive(Serialize)]
        struct Digest<'a> {
            attack_by_age: &'a AttackByAgeView,
            top_countries: &'a TopCountriesView,
            position_counts: BTreeMap<&'a str, usize>,
            histogram_counts: Vec<usize>,
        }

        let (_, summary) = InfographicComposer::new(&Config::default())
            .compose(&table_fixtures::three_players())
            .unwrap();
        let digest = Digest {
            attack_by_age: &summary.attack_by_age,
            top_countries: &summary.top_countries,
            position_counts: summary.position_distribution.counts(),
            histogram_counts: summary.age_histogram.bins.iter().map(|b| b.count).collect(),
        };

        insta::assert_snapshot!(
            "three_player_summary",
            serde_json::to_string_pretty(&digest).unwrap()
        );
    }

    #[test]
    fn test_description_text() {
        insta::assert_snapshot!("description", DESCRIPTION);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = InfographicComposer::new(&Config::default());
        let table = table_fixtures::squad();

        let (first_figure, first) = composer.compose(&table).unwrap();
        let (second_figure, second) = composer.compose(&table).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        assert_eq!(first_figure, second_figure);
    }

    #[test]
    fn test_chart_settings_reach_aggregators() {
        let charts = ChartsConfig {
            top_countries: 3,
            histogram_bins: 7,
        };
        let composer = InfographicComposer::with_settings(FigureConfig::default(), charts);
        let (figure, summary) = composer.compose(&table_fixtures::squad()).unwrap();

        assert_eq!(summary.top_countries.limit, 3);
        assert_eq!(summary.age_histogram.bins.len(), 7);
        assert_eq!(
            figure.surface(GridCell::TopRight).title(),
            Some("Top 3 Countries: Average Attack and Block")
        );
    }

    #[test]
    fn test_invalid_chart_settings_fail() {
        let charts = ChartsConfig {
            top_countries: 0,
            histogram_bins: 20,
        };
        let composer = InfographicComposer::with_settings(FigureConfig::default(), charts);
        assert!(matches!(
            composer.compose(&table_fixtures::squad()),
            Err(VnlError::Validation { .. })
        ));
    }

    #[test]
    fn test_summary_json_round_trip_to_disk() {
        let (_, summary) = InfographicComposer::new(&Config::default())
            .compose(&table_fixtures::three_players())
            .unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("summary.json");
        summary.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["rows"], 3);
        assert_eq!(value["attack_by_age"]["points"][1]["mean_attack"], 40.0);
        assert_eq!(value["position_distribution"]["positions"][0]["position"], "OH");
        assert!(value["top_countries"]["countries"][0]["block"].is_number());
    }

    #[test]
    fn test_image_format_from_path() {
        assert_eq!(ImageFormat::from_path(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("dir/a.SVG")).unwrap(), ImageFormat::Svg);
        assert!(ImageFormat::from_path(Path::new("a.jpg")).is_err());
        assert!(ImageFormat::from_path(Path::new("a")).is_err());
    }

    #[test]
    fn test_wrap_line() {
        let measure = |s: &str| Ok::<i32, Infallible>(s.chars().count() as i32);

        assert_eq!(
            wrap_line("Name       : Someone", 40, measure).unwrap(),
            vec!["Name       : Someone"]
        );
        assert_eq!(wrap_line("", 10, measure).unwrap(), vec![""]);
        assert_eq!(
            wrap_line("one two three four", 9, measure).unwrap(),
            vec!["one two", "three", "four"]
        );
        // A single word wider than the limit still gets its own line
        assert_eq!(
            wrap_line("extraordinarily long", 5, measure).unwrap(),
            vec!["extraordinarily", "long"]
        );
    }

    #[test]
    fn test_render_png_and_svg() {
        if !font_available("sans-serif") {
            return;
        }
        let (figure, _) = small_composer()
            .compose(&table_fixtures::squad())
            .unwrap();

        let png = figure.render_to_bytes(ImageFormat::Png).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert!(png.len() > 1000);

        let svg = String::from_utf8(figure.render_to_bytes(ImageFormat::Svg).unwrap()).unwrap();
        assert!(svg.contains("Player Statistics Analysis"));
        assert!(svg.contains("Positions"));
    }

    #[test]
    fn test_render_to_file() {
        if !font_available("sans-serif") {
            return;
        }
        let (figure, _) = small_composer()
            .compose(&table_fixtures::three_players())
            .unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("figures").join("22076992.png");
        let written = figure.render_to_file(&path).unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, written);
        assert!(figure.render_to_file(dir.path().join("figure.bmp")).is_err());
    }
}
