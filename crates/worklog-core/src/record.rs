use serde::{Deserialize, Serialize};

/// Canonical header row, in sheet column order (A through D).
pub const COLUMNS: [&str; 4] = [
    "Date",
    "Project / Category",
    "Accomplishment",
    "Key Insight / Outcome",
];

/// One work-log row. Every field is text; the remote sheet is untyped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLogRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Project / Category")]
    pub project_category: String,
    #[serde(rename = "Accomplishment")]
    pub accomplishment: String,
    #[serde(rename = "Key Insight / Outcome")]
    pub key_insight: String,
}

impl WorkLogRecord {
    #[must_use]
    pub fn new(
        date: impl Into<String>,
        project_category: impl Into<String>,
        accomplishment: impl Into<String>,
        key_insight: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            project_category: project_category.into(),
            accomplishment: accomplishment.into(),
            key_insight: key_insight.into(),
        }
    }

    /// Cell values in canonical column order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.project_category.clone(),
            self.accomplishment.clone(),
            self.key_insight.clone(),
        ]
    }

    /// Rebuild a record from a sheet row. Trailing empty cells are often
    /// omitted by the sheet, so short rows are padded with empty text.
    #[must_use]
    pub fn from_row(row: &[String]) -> Self {
        let cell = |index: usize| row.get(index).cloned().unwrap_or_default();
        Self::new(cell(0), cell(1), cell(2), cell(3))
    }
}

/// One task as returned by the summary extractor, before a date is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTask {
    pub project_category: String,
    pub accomplishment: String,
    pub key_insight: String,
}

/// Header row as owned cells, ready to prepend to an append batch.
#[must_use]
pub fn header_row() -> Vec<String> {
    COLUMNS.iter().map(|column| (*column).to_string()).collect()
}
