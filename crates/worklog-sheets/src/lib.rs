//! # worklog-sheets
//!
//! Remote spreadsheet access for worklog.
//!
//! - [`GoogleSheetsClient`]: service-account auth plus the Sheets and Drive
//!   REST calls (open by name, read rows, append rows, format)
//! - [`ConnectionManager`]: opens the configured document/tab once and
//!   caches the [`SheetHandle`] for the rest of the process
//! - [`SheetWriter`]: header-if-empty, single-batch append, best-effort
//!   formatting
//! - `memory::MemoryStore`: an in-memory backend implementing the same
//!   traits, for tests only (`test-support` feature)

pub mod auth;
pub mod client;
pub mod connection;
pub mod error;
pub mod format;
mod http;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod store;
pub mod writer;

pub use client::GoogleSheetsClient;
pub use connection::ConnectionManager;
pub use error::SheetsError;
pub use format::{Color, SheetFormatting};
pub use store::{Connector, SheetHandle, SheetStore, SheetTarget, ValueInputOption};
pub use writer::{SheetWriter, WriteOutcome};
