//! Cosmetic formatting applied after a successful append.

use serde::Serialize;
use serde_json::{Value, json};

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    #[must_use]
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }
}

/// Header row look plus the column span to auto-resize.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetFormatting {
    pub header_background: Color,
    pub header_foreground: Color,
    pub header_bold: bool,
    pub header_centered: bool,
    /// Number of header columns styled, starting at column A.
    pub columns: u32,
}

impl Default for SheetFormatting {
    fn default() -> Self {
        Self {
            header_background: Color::rgb(0.91, 0.96, 0.99),
            header_foreground: Color::rgb(0.05, 0.28, 0.63),
            header_bold: true,
            header_centered: true,
            columns: 4,
        }
    }
}

impl SheetFormatting {
    /// `batchUpdate` requests: style `A1` across the header columns, then
    /// auto-size the same columns.
    #[must_use]
    pub fn requests(&self, sheet_id: i64) -> Vec<Value> {
        let alignment = if self.header_centered { "CENTER" } else { "LEFT" };
        vec![
            json!({
                "repeatCell": {
                    "range": {
                        "sheetId": sheet_id,
                        "startRowIndex": 0,
                        "endRowIndex": 1,
                        "startColumnIndex": 0,
                        "endColumnIndex": self.columns,
                    },
                    "cell": {
                        "userEnteredFormat": {
                            "backgroundColor": self.header_background,
                            "textFormat": {
                                "bold": self.header_bold,
                                "foregroundColor": self.header_foreground,
                            },
                            "horizontalAlignment": alignment,
                        }
                    },
                    "fields": "userEnteredFormat(backgroundColor,textFormat,horizontalAlignment)",
                }
            }),
            json!({
                "autoResizeDimensions": {
                    "dimensions": {
                        "sheetId": sheet_id,
                        "dimension": "COLUMNS",
                        "startIndex": 0,
                        "endIndex": self.columns,
                    }
                }
            }),
        ]
    }
}
