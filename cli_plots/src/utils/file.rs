use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::plot::PlotError;

pub fn ensure_parent_exists(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    Ok(())
}

pub fn sanitize_filename(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// Explicit path, or `<output_dir>/<data file stem>_<suffix>.png`.
pub fn resolve_output_path(
    explicit: Option<&Path>,
    output_dir: &Path,
    data_file: &Path,
    suffix: &str,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let stem = data_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("suews");
    output_dir.join(format!("{}_{}.png", sanitize_filename(stem), suffix))
}

/// Refuses to overwrite unless forced.
pub fn check_overwrite(path: &Path, force: bool) -> Result<(), PlotError> {
    if path.exists() && !force {
        return Err(PlotError::OutputExists(path.to_path_buf()));
    }
    Ok(())
}
