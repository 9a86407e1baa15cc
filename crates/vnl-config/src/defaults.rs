//! Default values, matching the figure the analysis was designed around.

use crate::settings::*;

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            figure: FigureConfig::default(),
            charts: ChartsConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: "VNL2023.csv".to_string(),
        }
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            title: "Player Statistics Analysis".to_string(),
            width_in: 26.0,
            height_in: 13.0,
            dpi: 100,
            grid_fraction: 0.7,
            font_family: "sans-serif".to_string(),
            background_color: "#F0F0F0".to_string(),
            panel_background_color: "#F0F0F0".to_string(),
            fonts: FontSizes::default(),
        }
    }
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            figure_title: 24,
            chart_title: 20,
            axis_label: 18,
            tick: 16,
            legend: 16,
            description: 18,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            top_countries: 10,
            histogram_bins: 20,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save: false,
            path: "22076992.png".to_string(),
            summary_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
