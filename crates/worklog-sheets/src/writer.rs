//! Sheet writer.
//!
//! Appends a batch of records to an opened tab:
//! 1. read the tab to see whether it is empty,
//! 2. prepend the header row if it is,
//! 3. append header and data in one `USER_ENTERED` call,
//! 4. apply header formatting, reporting a failure only as a warning.
//!
//! Steps 1 and 3 fail the whole batch with [`SheetsError::Write`]; the single
//! append is relied on to be all-or-nothing.

use serde::Serialize;
use worklog_core::{WorkLogRecord, header_row};

use crate::error::SheetsError;
use crate::format::SheetFormatting;
use crate::store::{SheetHandle, SheetStore, ValueInputOption};

/// Result of a successful append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    /// Data rows written (the header is not counted).
    pub rows_written: usize,
    /// Whether the header row was written because the tab was empty.
    pub header_written: bool,
    /// Set when the rows were saved but formatting failed.
    pub format_warning: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SheetWriter {
    formatting: SheetFormatting,
}

impl SheetWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_formatting(formatting: SheetFormatting) -> Self {
        Self { formatting }
    }

    /// Append `records` to the tab behind `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::EmptyBatch`] for an empty slice (no remote
    /// call is made) and [`SheetsError::Write`] if reading or appending
    /// fails.
    pub async fn append<S: SheetStore>(
        &self,
        store: &S,
        handle: &SheetHandle,
        records: &[WorkLogRecord],
    ) -> Result<WriteOutcome, SheetsError> {
        if records.is_empty() {
            return Err(SheetsError::EmptyBatch);
        }

        let existing = store
            .read_all_rows(handle)
            .await
            .map_err(SheetsError::write)?;
        let header_written = existing.is_empty();

        let mut rows = Vec::with_capacity(records.len() + 1);
        if header_written {
            tracing::info!(tab = %handle.tab_title, "tab is empty; writing header row");
            rows.push(header_row());
        }
        rows.extend(records.iter().map(WorkLogRecord::to_row));

        store
            .append_rows(handle, &rows, ValueInputOption::UserEntered)
            .await
            .map_err(SheetsError::write)?;
        tracing::info!(
            rows = records.len(),
            header_written,
            document = %handle.document_title,
            "appended records"
        );

        let format_warning = match store.apply_formatting(handle, &self.formatting).await {
            Ok(()) => None,
            Err(error) => {
                tracing::warn!(%error, "formatting failed; data was still saved");
                Some(format!(
                    "Could not apply some formatting to the sheet. Data was still saved. Error: {error}"
                ))
            }
        };

        Ok(WriteOutcome {
            rows_written: records.len(),
            header_written,
            format_warning,
        })
    }
}
