//! Grid configuration errors

use thiserror::Error;

/// Errors raised when a grid is configured or driven incorrectly.
///
/// These are caller mistakes, not data problems. Bad data degrades to blank
/// cells and empty states; a bad configuration is refused outright so the
/// mistake surfaces during development instead of rendering a broken table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A grid was built without any column descriptors.
    #[error("grid requires at least one column")]
    NoColumns,
    /// A page size of zero was requested.
    #[error("page size must be at least 1, got {given}")]
    InvalidPageSize { given: usize },
    /// A sort referenced a column index the grid does not have.
    #[error("column index {index} out of range for {count} columns")]
    ColumnOutOfRange { index: usize, count: usize },
}

impl GridError {
    /// Creates an invalid page size error.
    pub fn invalid_page_size(given: usize) -> Self {
        Self::InvalidPageSize { given }
    }

    /// Creates a column out of range error.
    pub fn column_out_of_range(index: usize, count: usize) -> Self {
        Self::ColumnOutOfRange { index, count }
    }
}
