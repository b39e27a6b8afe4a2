use thiserror::Error;

/// Errors reported by the metric and enforcement functions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A column selection was empty where at least one column is required.
    #[error("empty column selection")]
    EmptyColumnSelection,
    /// A column index does not exist in the table.
    #[error("column index {index} out of bounds for table with {width} columns")]
    ColumnIndexOutOfBounds { index: usize, width: usize },
    /// The operation needs at least one row.
    #[error("operation requires a non-empty table")]
    EmptyTable,
    /// Two distributions were compared whose supports are not identical.
    #[error("distributions have mismatched supports")]
    MismatchedSupport,
    /// A value without a numeric key was used in a numeric context.
    #[error("non-numeric value `{0}` in numeric context")]
    NonNumeric(String),
    /// A row did not match the width of the first row.
    #[error("row {row} has {got} values, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
    /// Interval width for discretization must be positive.
    #[error("interval width must be positive, got {0}")]
    NonPositiveWidth(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
