//! Extraction error types.

use thiserror::Error;

/// Errors raised by the summary extractor. All are recoverable: the caller
/// reports them and waits for the next paragraph.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The paragraph was empty or whitespace; no request was sent.
    #[error("nothing to summarize: the text is blank")]
    BlankInput,

    /// No API key is configured.
    #[error("extraction service is not configured: set extractor.api_key (WORKLOG_EXTRACTOR__API_KEY)")]
    NotConfigured,

    /// The service rejected the API key.
    #[error("extraction service rejected the API key ({status}): {message}")]
    Credential {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// HTTP transport error (service unreachable, timeout, body read failure).
    #[error("could not reach the extraction service: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Any other non-success status.
    #[error("extraction service error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, or the raw body.
        message: String,
    },

    /// The response carried no candidate text.
    #[error("extraction service returned no result: {0}")]
    NoCandidate(String),

    /// The candidate text is not a JSON array of task objects.
    #[error("extraction service returned malformed output: {0}")]
    MalformedOutput(String),
}
