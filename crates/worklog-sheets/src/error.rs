//! Remote sheet error types.

use thiserror::Error;

/// Errors raised while connecting to or writing to the remote sheet.
///
/// The first four variants come from the connection manager and end the
/// session; the rest are recoverable by resubmitting.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// The service-account key is missing, unreadable, or was rejected.
    #[error("credential error: {0}")]
    Credential(String),

    /// No spreadsheet with this name (or id) is visible to the credential.
    #[error(
        "spreadsheet not found: could not find a Google Sheet named '{name}' (is it shared with the service account?)"
    )]
    DocumentNotFound { name: String },

    /// The spreadsheet exists but has no tab with this exact title.
    #[error(
        "worksheet not found: '{document}' has no tab named '{tab}' (tab names are case-sensitive)"
    )]
    TabNotFound { document: String, tab: String },

    /// Any other failure while establishing the connection.
    #[error("connection error: could not connect to Google Sheets: {0}")]
    Connection(String),

    /// Reading or appending rows failed; nothing should be assumed written.
    #[error("could not save data: {0}")]
    Write(#[source] Box<SheetsError>),

    /// The writer was handed no records.
    #[error("no records to write")]
    EmptyBatch,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Google API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, or the raw body.
        message: String,
    },

    /// A response did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SheetsError {
    /// Connection-manager failures; the session cannot continue without a
    /// configuration fix.
    #[must_use]
    pub const fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Self::Credential(_)
                | Self::DocumentNotFound { .. }
                | Self::TabNotFound { .. }
                | Self::Connection(_)
        )
    }

    pub(crate) fn write(source: Self) -> Self {
        match source {
            already @ Self::Write(_) => already,
            other => Self::Write(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_kinds_are_terminal() {
        assert!(SheetsError::Credential("bad key".into()).is_connection_failure());
        assert!(
            SheetsError::TabNotFound {
                document: "Daily Work Log".into(),
                tab: "sheet1".into()
            }
            .is_connection_failure()
        );
        assert!(!SheetsError::EmptyBatch.is_connection_failure());
        assert!(!SheetsError::write(SheetsError::Parse("x".into())).is_connection_failure());
    }

    #[test]
    fn write_wrapping_is_not_nested() {
        let once = SheetsError::write(SheetsError::Parse("boom".into()));
        let twice = SheetsError::write(once);
        let SheetsError::Write(inner) = twice else {
            panic!("expected write error");
        };
        assert!(matches!(*inner, SheetsError::Parse(_)));
    }

    #[test]
    fn tab_message_mentions_case() {
        let err = SheetsError::TabNotFound {
            document: "Daily Work Log".into(),
            tab: "sheet1".into(),
        };
        assert!(err.to_string().contains("case-sensitive"));
    }
}
