use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Failed to read table file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid number at line {line}, column {column}: {token:?}")]
    Parse {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("Ragged row at line {line}: expected {expected} columns, found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Row {row} has {found} columns but at least {required} are required")]
    TooFewColumns {
        row: usize,
        required: usize,
        found: usize,
    },
    #[error("Table contains no data rows")]
    EmptyTable,
    #[error("Year {value} in row {row} is out of the supported calendar range")]
    InvalidYear { row: usize, value: f64 },
    #[error("Decimal time {value} in row {row} cannot be converted to a date")]
    InvalidDecimalTime { row: usize, value: f64 },
    #[error("Got {rows} rows but {months} month numbers")]
    MonthCountMismatch { rows: usize, months: usize },
    #[error("Table shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
