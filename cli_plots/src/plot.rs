//! Rendering onto an explicit plotters canvas.
//!
//! Figures never touch shared state: each one is handed the drawing area it
//! must fill, and [`render_to_file`] owns creating and presenting it.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use common::dectime::to_datetime;
use common::error::TableError;

pub mod basic;
pub mod monthly;

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("Output table has {output} rows but input table has {input}")]
    RowCountMismatch { output: usize, input: usize },
    #[error("No data to plot")]
    NoData,
    #[error("Chart generation error: {0}")]
    Drawing(String),
    #[error("Invalid size format: {0}. Expected format: WIDTHxHEIGHT")]
    InvalidSizeFormat(String),
    #[error("Plot file already exists: {0}. Use --force to overwrite")]
    OutputExists(PathBuf),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Something that can draw itself onto any backend.
pub trait Figure {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), PlotError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

/// Draws `figure` on a fresh canvas and writes it to `path`.
pub fn render_to_file<F: Figure>(
    figure: &F,
    path: &Path,
    size: (u32, u32),
) -> Result<(), PlotError> {
    match ImageFormat::from_path(path) {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            figure.draw(&root)?;
            root.present().map_err(drawing("present chart"))
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            figure.draw(&root)?;
            root.present().map_err(drawing("present chart"))
        }
    }
}

/// Maps a plotters error into [`PlotError::Drawing`] with what was being drawn.
pub(crate) fn drawing<E: Display>(what: &'static str) -> impl FnOnce(E) -> PlotError {
    move |e| PlotError::Drawing(format!("Failed to {}: {}", what, e))
}

/// A labelled line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Pairs `xs` with `ys`, dropping non-finite values.
    pub fn new(
        label: &'static str,
        color: RGBColor,
        xs: &[f64],
        ys: impl IntoIterator<Item = f64>,
    ) -> Self {
        let points = xs
            .iter()
            .copied()
            .zip(ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        Self {
            label,
            color,
            points,
        }
    }
}

pub fn parse_size(size_str: &str) -> Result<(u32, u32), PlotError> {
    let parts: Vec<&str> = size_str.split('x').collect();
    if parts.len() != 2 {
        return Err(PlotError::InvalidSizeFormat(size_str.to_string()));
    }

    let width = parts[0]
        .parse::<u32>()
        .map_err(|_| PlotError::InvalidSizeFormat(size_str.to_string()))?;
    let height = parts[1]
        .parse::<u32>()
        .map_err(|_| PlotError::InvalidSizeFormat(size_str.to_string()))?;

    if width == 0 || height == 0 {
        return Err(PlotError::InvalidSizeFormat(size_str.to_string()));
    }

    Ok((width, height))
}

/// Min/max over finite values with 10% padding; a flat range is widened by 1.
pub fn value_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    let mut min_value = f64::INFINITY;
    let mut max_value = f64::NEG_INFINITY;

    for &value in values {
        if value.is_finite() {
            min_value = min_value.min(value);
            max_value = max_value.max(value);
        }
    }

    if min_value == f64::INFINITY || max_value == f64::NEG_INFINITY {
        return None;
    }

    let range = max_value - min_value;
    if range == 0.0 {
        return Some((min_value - 1.0, max_value + 1.0));
    }

    let padding = range * 0.1;
    Some((min_value - padding, max_value + padding))
}

/// Axis label for a decimal time.
pub fn date_label(dectime: f64) -> String {
    to_datetime(dectime)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
