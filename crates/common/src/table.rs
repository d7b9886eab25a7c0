//! Table ingestion: whitespace-delimited numeric files read into a raw
//! matrix, then converted once into named per-row records.

use std::fs;
use std::path::Path;

use ndarray::{Array2, ArrayView1};
use serde::Serialize;

use crate::error::TableError;

/// Numeric table as read from disk, one matrix row per data line.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    values: Array2<f64>,
}

impl RawTable {
    /// Parses whitespace-delimited text.
    ///
    /// Lines before the first data row whose first token is not a number are
    /// treated as headers. Blank lines and lines starting with `#` or `%` are
    /// skipped anywhere.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut flat: Vec<f64> = Vec::new();
        let mut width: Option<usize> = None;
        let mut nrows = 0;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
                continue;
            }

            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            if width.is_none() && tokens[0].parse::<f64>().is_err() {
                continue;
            }

            let expected = *width.get_or_insert(tokens.len());
            if tokens.len() != expected {
                return Err(TableError::Ragged {
                    line: line_no,
                    expected,
                    found: tokens.len(),
                });
            }

            for (column, token) in tokens.iter().enumerate() {
                let value = token.parse::<f64>().map_err(|_| TableError::Parse {
                    line: line_no,
                    column,
                    token: token.to_string(),
                })?;
                flat.push(value);
            }
            nrows += 1;
        }

        let ncols = width.ok_or(TableError::EmptyTable)?;
        let values = Array2::from_shape_vec((nrows, ncols), flat)?;
        Ok(Self { values })
    }

    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let text = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Converts every row into a named record.
    pub fn records<T: FromRow>(&self) -> Result<Vec<T>, TableError> {
        if self.ncols() < T::REQUIRED_COLUMNS {
            return Err(TableError::TooFewColumns {
                row: 0,
                required: T::REQUIRED_COLUMNS,
                found: self.ncols(),
            });
        }

        self.values
            .rows()
            .into_iter()
            .enumerate()
            .map(|(index, row)| T::from_row(index, row))
            .collect()
    }
}

/// A record built from one positional row of a raw table.
pub trait FromRow: Sized {
    const REQUIRED_COLUMNS: usize;

    fn from_row(index: usize, row: ArrayView1<'_, f64>) -> Result<Self, TableError>;
}

/// Column positions in the model output file.
mod output_columns {
    pub const YEAR: usize = 0;
    pub const DECTIME: usize = 4;
    pub const KDOWN: usize = 5;
    pub const KUP: usize = 6;
    pub const LDOWN: usize = 7;
    pub const LUP: usize = 8;
    pub const QSTAR: usize = 10;
    pub const QS: usize = 13;
    pub const QF: usize = 14;
    pub const QH: usize = 15;
    pub const QE: usize = 16;
    pub const PRECIP: usize = 17;
    pub const WATER_USE: usize = 18;
    pub const EVAP: usize = 19;
    pub const STORAGE_CHANGE: usize = 23;
    pub const RUNOFF: usize = 25;
    pub const SMD: usize = 43;
    pub const LAI: usize = 57;
}

/// Column positions in the meteorological forcing file.
mod input_columns {
    pub const PRECIP: usize = 13;
}

/// One row of model output. Fluxes in W m-2, water terms in mm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutputRecord {
    pub year: i32,
    /// Day of year with fractional hour.
    pub dectime: f64,
    pub kdown: f64,
    pub kup: f64,
    pub ldown: f64,
    pub lup: f64,
    pub qstar: f64,
    pub qs: f64,
    pub qf: f64,
    pub qh: f64,
    pub qe: f64,
    pub precip: f64,
    pub water_use: f64,
    pub evap: f64,
    pub storage_change: f64,
    pub runoff: f64,
    pub smd: f64,
    pub lai: f64,
}

impl FromRow for OutputRecord {
    const REQUIRED_COLUMNS: usize = output_columns::LAI + 1;

    fn from_row(index: usize, row: ArrayView1<'_, f64>) -> Result<Self, TableError> {
        use output_columns::*;

        if row.len() < Self::REQUIRED_COLUMNS {
            return Err(TableError::TooFewColumns {
                row: index,
                required: Self::REQUIRED_COLUMNS,
                found: row.len(),
            });
        }

        Ok(Self {
            year: parse_year(index, row[YEAR])?,
            dectime: row[DECTIME],
            kdown: row[KDOWN],
            kup: row[KUP],
            ldown: row[LDOWN],
            lup: row[LUP],
            qstar: row[QSTAR],
            qs: row[QS],
            qf: row[QF],
            qh: row[QH],
            qe: row[QE],
            precip: row[PRECIP],
            water_use: row[WATER_USE],
            evap: row[EVAP],
            storage_change: row[STORAGE_CHANGE],
            runoff: row[RUNOFF],
            smd: row[SMD],
            lai: row[LAI],
        })
    }
}

/// One row of meteorological forcing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InputRecord {
    /// mm
    pub precip: f64,
}

impl FromRow for InputRecord {
    const REQUIRED_COLUMNS: usize = input_columns::PRECIP + 1;

    fn from_row(index: usize, row: ArrayView1<'_, f64>) -> Result<Self, TableError> {
        if row.len() < Self::REQUIRED_COLUMNS {
            return Err(TableError::TooFewColumns {
                row: index,
                required: Self::REQUIRED_COLUMNS,
                found: row.len(),
            });
        }

        Ok(Self {
            precip: row[input_columns::PRECIP],
        })
    }
}

/// Truncates toward zero, the way the year column has always been read.
fn parse_year(row: usize, value: f64) -> Result<i32, TableError> {
    if !value.is_finite() || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(TableError::InvalidYear { row, value });
    }
    Ok(value.trunc() as i32)
}

pub fn load_output_table(path: &Path) -> Result<Vec<OutputRecord>, TableError> {
    RawTable::from_file(path)?.records()
}

pub fn load_input_table(path: &Path) -> Result<Vec<InputRecord>, TableError> {
    RawTable::from_file(path)?.records()
}
