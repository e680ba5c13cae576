//! # worklog-extract
//!
//! Turns a free-text summary of a working day into
//! [`ExtractedTask`](worklog_core::ExtractedTask) triples using the Gemini
//! `generateContent` API with a fixed system instruction and a JSON response
//! schema. Dates are added afterwards by the row normalizer.

pub mod error;
pub mod extractor;
mod http;
pub mod prompt;
pub mod response;

pub use error::ExtractError;
pub use extractor::SummaryExtractor;
pub use response::{parse_response, parse_tasks};
