//! The seams between the writer/connection manager and a concrete sheet
//! backend.

use serde::Serialize;
use worklog_config::SheetConfig;

use crate::error::SheetsError;
use crate::format::SheetFormatting;

/// Which document and tab to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTarget {
    pub document_name: String,
    pub tab_name: String,
    /// Open this id directly instead of searching by name.
    pub spreadsheet_id: Option<String>,
}

impl SheetTarget {
    #[must_use]
    pub fn new(document_name: impl Into<String>, tab_name: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            tab_name: tab_name.into(),
            spreadsheet_id: None,
        }
    }
}

impl From<&SheetConfig> for SheetTarget {
    fn from(config: &SheetConfig) -> Self {
        Self {
            document_name: config.document_name.clone(),
            tab_name: config.tab_name.clone(),
            spreadsheet_id: config
                .has_spreadsheet_id()
                .then(|| config.spreadsheet_id.trim().to_string()),
        }
    }
}

/// A resolved (document, tab) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetHandle {
    pub spreadsheet_id: String,
    pub document_title: String,
    pub tab_title: String,
    /// Numeric tab id used by formatting requests.
    pub tab_id: i64,
}

impl SheetHandle {
    /// A1 range covering the whole tab.
    #[must_use]
    pub fn whole_tab_range(&self) -> String {
        quote_tab(&self.tab_title)
    }

    /// Append anchor at the tab's first cell.
    #[must_use]
    pub fn append_range(&self) -> String {
        format!("{}!A1", quote_tab(&self.tab_title))
    }
}

fn quote_tab(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// How the store interprets appended cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    /// Stored exactly as given.
    Raw,
    /// Parsed as if typed by a user (dates and numbers become typed values).
    UserEntered,
}

impl ValueInputOption {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

/// Opens a [`SheetHandle`] for a target.
#[allow(async_fn_in_trait)]
pub trait Connector {
    /// Authenticate, open the document, open the tab.
    async fn connect(&self, target: &SheetTarget) -> Result<SheetHandle, SheetsError>;
}

/// Row-level operations on an opened tab.
#[allow(async_fn_in_trait)]
pub trait SheetStore {
    /// Every non-empty row currently on the tab, as text.
    async fn read_all_rows(&self, handle: &SheetHandle) -> Result<Vec<Vec<String>>, SheetsError>;

    /// Append rows after the last non-empty row in a single call.
    async fn append_rows(
        &self,
        handle: &SheetHandle,
        rows: &[Vec<String>],
        input: ValueInputOption,
    ) -> Result<(), SheetsError>;

    /// Style the header row and auto-size the columns.
    async fn apply_formatting(
        &self,
        handle: &SheetHandle,
        formatting: &SheetFormatting,
    ) -> Result<(), SheetsError>;
}
