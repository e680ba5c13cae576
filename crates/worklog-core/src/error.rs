//! Row normalization error types.

use thiserror::Error;

/// Input that cannot be turned into work-log records. All variants reject
/// the whole batch; nothing is written.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The batch has a column count other than 3 or 4.
    #[error("expected 3 or 4 columns, but found {found}")]
    ColumnCount { found: usize },

    /// A later row disagrees with the first row's column count.
    #[error("row {row} has {found} columns, but the batch started with {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// No rows, or no row carries a project/category.
    #[error("the data appears to be empty or in the wrong format")]
    EmptyOrMalformedData,

    /// The tabular parser could not read the text.
    #[error("could not read the data as CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl NormalizeError {
    /// True for both column-count failures (uniform and ragged).
    #[must_use]
    pub const fn is_column_count(&self) -> bool {
        matches!(self, Self::ColumnCount { .. } | Self::RaggedRow { .. })
    }
}
