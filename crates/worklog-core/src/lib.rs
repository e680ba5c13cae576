//! # worklog-core
//!
//! Domain types and the row normalizer shared by every worklog crate.
//!
//! - [`WorkLogRecord`]: the canonical four-column row appended to the sheet
//! - [`ExtractedTask`]: the three-field triple returned by the summary extractor
//! - [`Clock`]: injectable time source used to stamp batches
//! - [`normalize`]: turns pasted CSV text or extracted tasks into records

pub mod clock;
pub mod error;
pub mod normalize;
pub mod record;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::NormalizeError;
pub use normalize::{normalize_delimited, normalize_extracted, normalize_rows};
pub use record::{COLUMNS, ExtractedTask, WorkLogRecord, header_row};
