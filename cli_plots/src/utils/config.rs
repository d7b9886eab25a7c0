use anyhow::{Context, Result};
use common::config;
use common::monthly::MonthLayout;
use std::path::PathBuf;

/// Defaults for commands, resolved from overrides, environment and TOML.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub output_dir: PathBuf,
    pub size: String,
    pub layout: MonthLayout,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("plots"),
            size: "1500x700".to_string(),
            layout: MonthLayout::Observed,
        }
    }
}

impl PlotSettings {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let output_dir = config::get("PLOT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let size = config::get("PLOT_SIZE").unwrap_or(defaults.size);
        let layout = match config::get("MONTH_LAYOUT") {
            Ok(value) => value.parse().context("Invalid MONTH_LAYOUT setting")?,
            Err(_) => defaults.layout,
        };

        Ok(Self {
            output_dir,
            size,
            layout,
        })
    }
}
