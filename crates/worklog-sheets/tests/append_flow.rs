//! End-to-end append flow against the in-memory backend: paste text is
//! normalized, the connection is opened once, and records land under a
//! single header row.

use chrono::{Local, TimeZone};
use pretty_assertions::assert_eq;
use worklog_core::{COLUMNS, FixedClock, WorkLogRecord, normalize_delimited};
use worklog_sheets::memory::{MemoryStore, Operation};
use worklog_sheets::{ConnectionManager, SheetTarget, SheetWriter, SheetsError};

const DOC: &str = "Daily Work Log";
const TAB: &str = "Sheet1";

fn clock() -> FixedClock {
    FixedClock(Local.with_ymd_and_hms(2025, 10, 24, 9, 30, 0).unwrap())
}

fn manager() -> ConnectionManager<MemoryStore> {
    ConnectionManager::new(
        MemoryStore::new().with_document(DOC, &[TAB, "Archive"]),
        SheetTarget::new(DOC, TAB),
    )
}

#[tokio::test]
async fn three_submissions_share_one_connection_and_one_header() {
    let mut manager = manager();
    let writer = SheetWriter::new();

    let batches = [
        "PII Detection,Validated package,Package is stable",
        "Infra,Rotated keys,No downtime\nDocs,Wrote runbook,Team onboarded",
        "2025-10-23,Infra,Fixed CI,Builds green",
    ];
    for input in batches {
        let records = normalize_delimited(input, &clock()).unwrap();
        let (store, handle) = manager.acquire().await.unwrap();
        writer.append(store, handle, &records).await.unwrap();
    }

    let store = manager.connector();
    assert_eq!(store.connect_calls(), 1);

    let rows = store.rows(DOC, TAB);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], COLUMNS.to_vec());
    assert_eq!(
        rows[1],
        vec![
            "2025-10-24 09:30:00",
            "PII Detection",
            "Validated package",
            "Package is stable"
        ]
    );
    let first = normalize_delimited(batches[0], &clock()).unwrap();
    assert_eq!(WorkLogRecord::from_row(&rows[1]), first[0]);
    assert_eq!(rows[2][0], rows[3][0]);
    assert_eq!(rows[4][0], "2025-10-23");
    assert!(store.rows(DOC, "Archive").is_empty());
}

#[tokio::test]
async fn write_failure_then_recovery_after_invalidate() {
    let mut manager = manager();
    let writer = SheetWriter::new();
    let records = normalize_delimited("Infra,Rotated keys,No downtime", &clock()).unwrap();

    manager.connector().fail(Operation::Append, true);
    let (store, handle) = manager.acquire().await.unwrap();
    let err = writer.append(store, handle, &records).await.unwrap_err();
    assert!(matches!(err, SheetsError::Write(_)));
    manager.invalidate();

    manager.connector().fail(Operation::Append, false);
    let (store, handle) = manager.acquire().await.unwrap();
    let outcome = writer.append(store, handle, &records).await.unwrap();

    assert!(outcome.header_written);
    assert_eq!(manager.connector().connect_calls(), 2);
    assert_eq!(manager.connector().rows(DOC, TAB).len(), 2);
}
