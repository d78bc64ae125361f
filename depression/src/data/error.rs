use thiserror::Error;

use crate::errors::SchemaError;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("Column '{0}' has no values")]
    NoValues(String),

    #[error("Row index {index} is out of bounds for a dataset of {len} rows")]
    RowOutOfBounds { index: usize, len: usize },

    #[error("Invalid test ratio {0}: must be strictly between 0 and 1")]
    InvalidRatio(f64),

    #[error("Not enough rows ({rows}) to split into non-empty train and test sets")]
    TooFewRows { rows: usize },
}

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Failed to open file: {0}")]
    FileOpen(#[from] std::io::Error),

    #[error("CSV file is empty")]
    EmptyFile,

    #[error("Inconsistent column count: row {row} has {actual} columns, expected {expected}")]
    InconsistentColumns { row: usize, actual: usize, expected: usize },

    #[error("Invalid target value '{value}' at row {row}: expected 0 or 1")]
    InvalidTarget { value: String, row: usize },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),
}
