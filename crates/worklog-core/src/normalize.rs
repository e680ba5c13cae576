//! Row normalizer.
//!
//! Accepts either pasted comma-separated text (3 or 4 fields per row) or the
//! triples returned by the summary extractor, and produces canonical
//! [`WorkLogRecord`]s. A batch is accepted or rejected as a whole.
//!
//! Four-field rows carry their own date. Three-field rows are stamped with a
//! single timestamp taken once per batch, so every row of one submission
//! shares it. Extracted tasks are stamped with the date only.

use crate::clock::{Clock, DATE_FORMAT, DATETIME_FORMAT};
use crate::error::NormalizeError;
use crate::record::{ExtractedTask, WorkLogRecord};

/// Parse pasted CSV text and normalize it.
///
/// Unquoted fields are trimmed. Quoted fields keep their text as written
/// and may contain commas or line breaks. Rows made only of empty cells are
/// skipped.
///
/// # Errors
///
/// Returns [`NormalizeError::Csv`] if the text cannot be parsed, a
/// column-count error if the rows are not uniformly 3 or 4 fields wide, and
/// [`NormalizeError::EmptyOrMalformedData`] if nothing usable remains.
pub fn normalize_delimited(
    input: &str,
    clock: &impl Clock,
) -> Result<Vec<WorkLogRecord>, NormalizeError> {
    let rows = read_rows(input)?;
    normalize_rows(rows, clock)
}

/// Normalize already-split rows.
///
/// # Errors
///
/// See [`normalize_delimited`].
pub fn normalize_rows(
    rows: Vec<Vec<String>>,
    clock: &impl Clock,
) -> Result<Vec<WorkLogRecord>, NormalizeError> {
    let Some(width) = rows.first().map(Vec::len) else {
        return Err(NormalizeError::EmptyOrMalformedData);
    };
    if !matches!(width, 3 | 4) {
        return Err(NormalizeError::ColumnCount { found: width });
    }
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(NormalizeError::RaggedRow {
            row: index + 1,
            expected: width,
            found: row.len(),
        });
    }

    let stamp = (width == 3).then(|| clock.now().format(DATETIME_FORMAT).to_string());

    let records = rows
        .into_iter()
        .map(|row| {
            let mut cells = row.into_iter();
            let date = match &stamp {
                Some(stamp) => stamp.clone(),
                None => cells.next().unwrap_or_default(),
            };
            WorkLogRecord::new(
                date,
                cells.next().unwrap_or_default(),
                cells.next().unwrap_or_default(),
                cells.next().unwrap_or_default(),
            )
        })
        .collect();

    ensure_usable(records)
}

/// Apply one date-only stamp to every extracted task.
///
/// # Errors
///
/// Returns [`NormalizeError::EmptyOrMalformedData`] when `tasks` is empty or
/// no task names a project/category.
pub fn normalize_extracted(
    tasks: Vec<ExtractedTask>,
    clock: &impl Clock,
) -> Result<Vec<WorkLogRecord>, NormalizeError> {
    let date = clock.now().format(DATE_FORMAT).to_string();

    let records = tasks
        .into_iter()
        .map(|task| {
            WorkLogRecord::new(
                date.clone(),
                task.project_category.trim(),
                task.accomplishment.trim(),
                task.key_insight.trim(),
            )
        })
        .collect();

    ensure_usable(records)
}

fn read_rows(input: &str) -> Result<Vec<Vec<String>>, NormalizeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        let start = reader.position().byte();
        if !reader.read_record(&mut record)? {
            break;
        }
        let end = reader.position().byte();
        let quoted = quoted_fields(raw_slice(input, start, end));

        let row: Vec<String> = record
            .iter()
            .enumerate()
            .map(|(index, field)| {
                if quoted.get(index).copied().unwrap_or(false) {
                    field.to_string()
                } else {
                    field.trim().to_string()
                }
            })
            .collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn raw_slice(input: &str, start: u64, end: u64) -> &str {
    let (Ok(start), Ok(end)) = (usize::try_from(start), usize::try_from(end)) else {
        return "";
    };
    input.get(start..end).unwrap_or_default()
}

/// Which fields of one raw CSV record open with a quote.
fn quoted_fields(raw: &str) -> Vec<bool> {
    let mut quoted = Vec::new();
    let mut at_field_start = true;
    let mut in_quotes = false;
    for ch in raw.trim_start_matches(['\r', '\n']).chars() {
        if at_field_start {
            quoted.push(ch == '"');
            at_field_start = false;
        }
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => at_field_start = true,
            '\n' | '\r' if !in_quotes => break,
            _ => {}
        }
    }
    quoted
}

fn ensure_usable(records: Vec<WorkLogRecord>) -> Result<Vec<WorkLogRecord>, NormalizeError> {
    if records.iter().all(|record| record.project_category.is_empty()) {
        return Err(NormalizeError::EmptyOrMalformedData);
    }
    Ok(records)
}
