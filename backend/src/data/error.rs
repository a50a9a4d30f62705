//! Error types for loading the order table.

use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Result type for data source operations
pub type DataSourceResult<T> = Result<T, DataSourceError>;

/// Error type for loading the base order table.
///
/// Every variant is fatal: the table is either loaded completely or not at all.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    /// The source file does not exist.
    #[error("Data source not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The source exists but could not be read or decoded as CSV.
    #[error("Failed to read data source {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// A required column is absent from the header.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A column could not be viewed as text. `read_csv` yields text columns
    /// only; this arises when `dataframe_to_records` is given a typed frame.
    #[error("Column '{column}' has an unexpected type: {source}")]
    ColumnType {
        column: String,
        #[source]
        source: PolarsError,
    },

    /// A purchase timestamp could not be parsed.
    #[error("Unparseable timestamp '{value}' at row {row}")]
    InvalidTimestamp { row: usize, value: String },

    /// A cell holds a value outside the column's domain.
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
}

impl DataSourceError {
    pub fn invalid_value(column: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            row,
            value: value.into(),
        }
    }
}
