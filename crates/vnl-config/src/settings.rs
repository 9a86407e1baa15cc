//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Largest bitmap edge we are willing to allocate, in pixels
pub const MAX_FIGURE_EDGE_PX: f64 = 16_000.0;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Input table settings
    #[validate]
    pub data: DataConfig,

    /// Figure layout and styling
    #[validate]
    pub figure: FigureConfig,

    /// Per-chart aggregation parameters
    #[validate]
    pub charts: ChartsConfig,

    /// Where and whether to persist the result
    #[validate]
    pub output: OutputConfig,

    /// Logging configuration
    #[validate]
    pub logging: LoggingConfig,
}

/// Input table settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the player statistics CSV
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "CSV path must be a non-empty, valid file path"
    ))]
    pub csv_path: String,
}

/// Figure layout and styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FigureConfig {
    /// Figure title drawn above the chart grid
    #[validate(length(min = 1, message = "Figure title cannot be empty"))]
    pub title: String,

    /// Canvas width in inches
    #[validate(range(min = 4.0, max = 60.0, message = "Width must be between 4 and 60 inches"))]
    pub width_in: f64,

    /// Canvas height in inches
    #[validate(range(min = 3.0, max = 40.0, message = "Height must be between 3 and 40 inches"))]
    pub height_in: f64,

    /// Dots per inch; also scales every font size
    #[validate(range(min = 50, max = 600, message = "DPI must be between 50 and 600"))]
    pub dpi: u32,

    /// Share of the canvas width given to the chart grid; the description
    /// panel takes the rest
    #[validate(range(min = 0.4, max = 1.0, message = "Grid fraction must be between 0.4 and 1.0"))]
    pub grid_fraction: f64,

    /// Font family used for every text element
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Figure background color
    #[validate(custom(
        function = "crate::validation::validate_hex_color",
        message = "Background color must be a #RRGGBB hex color"
    ))]
    pub background_color: String,

    /// Background of each chart panel
    #[validate(custom(
        function = "crate::validation::validate_hex_color",
        message = "Panel background color must be a #RRGGBB hex color"
    ))]
    pub panel_background_color: String,

    /// Font sizes in points
    #[validate]
    pub fonts: FontSizes,
}

/// Font sizes in points (converted to pixels with the figure DPI)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FontSizes {
    /// Figure title
    #[validate(range(min = 4, max = 96))]
    pub figure_title: u32,
    /// Chart titles
    #[validate(range(min = 4, max = 96))]
    pub chart_title: u32,
    /// Axis descriptions
    #[validate(range(min = 4, max = 96))]
    pub axis_label: u32,
    /// Tick labels
    #[validate(range(min = 4, max = 96))]
    pub tick: u32,
    /// Legend entries
    #[validate(range(min = 4, max = 96))]
    pub legend: u32,
    /// Description panel text
    #[validate(range(min = 4, max = 96))]
    pub description: u32,
}

/// Per-chart aggregation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartsConfig {
    /// How many countries each metric keeps in the bar chart
    #[validate(range(min = 1, max = 50, message = "Top countries must be between 1 and 50"))]
    pub top_countries: usize,

    /// Number of equal-width age bins
    #[validate(range(min = 1, max = 200, message = "Histogram bins must be between 1 and 200"))]
    pub histogram_bins: usize,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// Write the rendered figure to `path`
    pub save: bool,

    /// Image path; the extension picks PNG or SVG
    #[validate(custom(
        function = "crate::validation::validate_image_path",
        message = "Output path must end in .png or .svg"
    ))]
    pub path: String,

    /// Optional JSON dump of the aggregated views
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Summary path must be a valid file path"
    ))]
    pub summary_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Emit JSON lines instead of human readable output
    pub json: bool,

    /// Optional log file
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Log file must be a valid file path"
    ))]
    pub file: Option<String>,
}

impl Config {
    /// Runs field validation plus the cross-field figure checks
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        self.figure.validate_pixel_size()?;
        Ok(())
    }
}

impl FigureConfig {
    /// Canvas size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Converts a size in points to pixels at this figure's DPI
    pub fn points_to_px(&self, points: u32) -> u32 {
        ((f64::from(points) * f64::from(self.dpi)) / 72.0).round() as u32
    }

    /// Rejects figures whose bitmap would be unreasonably large
    pub fn validate_pixel_size(&self) -> Result<(), ValidationErrors> {
        let dpi = f64::from(self.dpi);
        let mut errors = ValidationErrors::new();

        if self.width_in * dpi > MAX_FIGURE_EDGE_PX {
            errors.add("width_in", ValidationError::new("figure_too_wide"));
        }
        if self.height_in * dpi > MAX_FIGURE_EDGE_PX {
            errors.add("height_in", ValidationError::new("figure_too_tall"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<&LoggingConfig> for vnl_common::LoggingConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            json_format: config.json,
            file_path: config.file.as_ref().map(Into::into),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate_all().is_ok());
    }

    #[test]
    fn test_pixel_size_and_point_conversion() {
        let mut figure = FigureConfig::default();
        figure.width_in = 18.0;
        figure.height_in = 12.0;
        figure.dpi = 100;

        assert_eq!(figure.pixel_size(), (1800, 1200));
        assert_eq!(figure.points_to_px(72), 100);
        assert_eq!(figure.points_to_px(18), 25);

        figure.dpi = 300;
        assert_eq!(figure.pixel_size(), (5400, 3600));
        assert_eq!(figure.points_to_px(20), 83);
    }

    #[test]
    fn test_invalid_colors_fail_validation() {
        let mut config = Config::default();
        config.figure.background_color = "grey".to_string();
        assert!(config.validate().is_err());

        config.figure.background_color = "#F0F0F0".to_string();
        config.figure.panel_background_color = "#F0F0F".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_chart_parameter_ranges() {
        let mut config = Config::default();
        config.charts.top_countries = 0;
        assert!(config.validate().is_err());

        config.charts.top_countries = 10;
        config.charts.histogram_bins = 0;
        assert!(config.validate().is_err());

        config.charts.histogram_bins = 20;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_path_extension() {
        let mut config = Config::default();
        config.output.path = "figure.svg".to_string();
        assert!(config.validate().is_ok());

        config.output.path = "figure.gif".to_string();
        let errors = config.validate().unwrap_err();
        assert!(errors.errors().contains_key("output"));
    }

    #[test]
    fn test_oversized_figure_rejected() {
        let mut config = Config::default();
        config.figure.width_in = 60.0;
        config.figure.dpi = 600;

        assert!(config.validate().is_ok());
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_logging_conversion() {
        let settings = LoggingConfig {
            level: "debug".to_string(),
            json: true,
            file: Some("vnl.log".to_string()),
        };

        let logging: vnl_common::LoggingConfig = (&settings).into();
        assert_eq!(logging.level, "debug");
        assert!(logging.json_format);
        assert_eq!(logging.file_path, Some("vnl.log".into()));
    }
}
