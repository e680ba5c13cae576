//! Response status handling for the Gemini API.
//!
//! Errors arrive as `{"error": {"code", "message", "status", "details"}}`.
//! A bad key is reported as 400 with `API_KEY_INVALID` in the details, so
//! the raw body is searched for that reason before classifying by status.

use serde::Deserialize;

use crate::error::ExtractError;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Return the response unchanged on success, otherwise a classified error.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ExtractError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(classify(status, &body))
}

fn classify(status: u16, body: &str) -> ExtractError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    let rejected_key = matches!(status, 401 | 403)
        || (status == 400 && body.contains("API_KEY_INVALID"));
    if rejected_key {
        ExtractError::Credential { status, message }
    } else {
        ExtractError::Api { status, message }
    }
}
