//! Shared HTTP response helpers for the Google API calls.
//!
//! Google reports failures as `{"error": {"code", "message", "status"}}`.
//! [`check_response`] turns any non-success status into
//! [`SheetsError::Api`] carrying that message so callers can classify it.

use serde::Deserialize;

use crate::error::SheetsError;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    /// Sheets / Drive style.
    Status {
        #[serde(default)]
        message: String,
    },
    /// OAuth token endpoint style (`{"error": "invalid_grant", ...}`).
    Code(String),
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(SheetsError::Api {
        status,
        message: error_message(&body),
    })
}

/// Pull the human-readable message out of a Google error body, falling back
/// to the raw body.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct OAuthError {
        #[serde(default)]
        error_description: String,
    }

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorBody::Status { message },
        }) if !message.is_empty() => message,
        Ok(ErrorEnvelope {
            error: ErrorBody::Code(code),
        }) => {
            let description = serde_json::from_str::<OAuthError>(body)
                .map(|e| e.error_description)
                .unwrap_or_default();
            if description.is_empty() {
                code
            } else {
                format!("{code}: {description}")
            }
        }
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn check_response_success() {
        let resp = mock_response(200, "{}");
        assert!(check_response(resp).await.is_ok());
    }

    #[tokio::test]
    async fn check_response_extracts_google_message() {
        let resp = mock_response(
            404,
            r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#,
        );
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            SheetsError::Api { status: 404, ref message } if message == "Requested entity was not found."
        ));
    }

    #[tokio::test]
    async fn check_response_extracts_oauth_error() {
        let resp = mock_response(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#,
        );
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            SheetsError::Api { status: 400, ref message } if message == "invalid_grant: Invalid JWT Signature."
        ));
    }

    #[tokio::test]
    async fn check_response_falls_back_to_raw_body() {
        let resp = mock_response(502, "Bad Gateway\n");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, SheetsError::Api { status: 502, ref message } if message == "Bad Gateway"));
    }
}
