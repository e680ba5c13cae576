//! Target spreadsheet configuration.

use serde::{Deserialize, Serialize};

fn default_document_name() -> String {
    String::from("Daily Work Log")
}

fn default_tab_name() -> String {
    String::from("Sheet1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetConfig {
    /// Spreadsheet title, looked up through Drive.
    #[serde(default = "default_document_name")]
    pub document_name: String,

    /// Worksheet tab title. Matched case-sensitively.
    #[serde(default = "default_tab_name")]
    pub tab_name: String,

    /// Spreadsheet id. When set, the name lookup is skipped.
    #[serde(default)]
    pub spreadsheet_id: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            document_name: default_document_name(),
            tab_name: default_tab_name(),
            spreadsheet_id: String::new(),
        }
    }
}

impl SheetConfig {
    /// Whether the document is addressed by id instead of by title.
    #[must_use]
    pub fn has_spreadsheet_id(&self) -> bool {
        !self.spreadsheet_id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SheetConfig::default();
        assert_eq!(config.document_name, "Daily Work Log");
        assert_eq!(config.tab_name, "Sheet1");
        assert!(!config.has_spreadsheet_id());
    }

    #[test]
    fn whitespace_id_is_ignored() {
        let config = SheetConfig {
            spreadsheet_id: "  ".into(),
            ..Default::default()
        };
        assert!(!config.has_spreadsheet_id());
    }
}
