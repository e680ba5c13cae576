use serde::Serialize;
use serde_json::Value;
use worklog_core::{COLUMNS, WorkLogRecord};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Render records in sheet column order.
pub fn render_records(records: &[WorkLogRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Raw => Ok(serde_json::to_string(records)?),
        OutputFormat::Table => {
            let rows = records.iter().map(WorkLogRecord::to_row).collect::<Vec<_>>();
            Ok(table::render_table(&COLUMNS, &rows, table_options()))
        }
    }
}

/// Render a serializable object; tables show one key/value pair per line.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let rows = match serde_json::to_value(value)? {
                Value::Object(map) => map
                    .into_iter()
                    .map(|(key, value)| vec![key, value_to_cell(&value)])
                    .collect(),
                other => vec![vec![String::from("value"), value_to_cell(&other)]],
            };
            Ok(table::render_table(&["key", "value"], &rows, table_options()))
        }
    }
}

pub fn records(records: &[WorkLogRecord], format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_records(records, format)?);
    Ok(())
}

pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use worklog_core::WorkLogRecord;

    use super::{render, render_records};
    use crate::cli::OutputFormat;

    fn sample() -> Vec<WorkLogRecord> {
        vec![WorkLogRecord::new(
            "2025-10-24",
            "PII Detection",
            "Validated package",
            "N/A",
        )]
    }

    #[test]
    fn json_records_use_column_names() {
        let out = render_records(&sample(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["Date"], "2025-10-24");
        assert_eq!(parsed[0]["Project / Category"], "PII Detection");
        assert_eq!(parsed[0]["Key Insight / Outcome"], "N/A");
    }

    #[test]
    fn raw_records_are_single_line() {
        let out = render_records(&sample(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_records_keep_column_order() {
        let out = render_records(&sample(), OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap_or_default();
        let date = header.find("Date").unwrap();
        let project = header.find("Project / Category").unwrap();
        let insight = header.find("Key Insight / Outcome").unwrap();
        assert!(date < project && project < insight);
        assert!(out.contains("Validated package"));
    }

    #[derive(Serialize)]
    struct Report {
        document: &'static str,
        tab_id: i64,
        spreadsheet_id: Option<&'static str>,
    }

    #[test]
    fn object_table_has_key_value_rows() {
        let report = Report {
            document: "Daily Work Log",
            tab_id: 0,
            spreadsheet_id: None,
        };
        let out = render(&report, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("Daily Work Log"));
        assert!(out.lines().any(|line| line.starts_with("spreadsheet_id") && line.ends_with('-')));
    }
}
