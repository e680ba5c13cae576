//! Parsing of `generateContent` responses into [`ExtractedTask`]s.

use serde::Deserialize;
use worklog_core::ExtractedTask;

use crate::error::ExtractError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::NoCandidate`] when there is no candidate or it
    /// carries no text.
    pub fn candidate_text(&self) -> Result<String, ExtractError> {
        let Some(candidate) = self.candidates.first() else {
            let reason = self
                .prompt_feedback
                .as_ref()
                .and_then(|feedback| feedback.block_reason.as_deref())
                .map_or_else(
                    || "no candidates in response".to_string(),
                    |reason| format!("request blocked ({reason})"),
                );
            return Err(ExtractError::NoCandidate(reason));
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|content| &content.parts)
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            return Err(ExtractError::NoCandidate(format!(
                "candidate has no text (finish reason: {reason})"
            )));
        }
        Ok(text)
    }
}

/// Parse a `generateContent` response body.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedOutput`] if the body is not a response
/// envelope, [`ExtractError::NoCandidate`] if it holds no text, and
/// [`ExtractError::MalformedOutput`] if the text is not a task array.
pub fn parse_response(body: &str) -> Result<Vec<ExtractedTask>, ExtractError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ExtractError::MalformedOutput(format!("unexpected response body: {e}")))?;
    parse_tasks(&response.candidate_text()?)
}

/// Parse candidate text as an array of tasks.
///
/// A surrounding markdown code fence is tolerated.
///
/// # Errors
///
/// Returns [`ExtractError::MalformedOutput`] if the text is not a JSON array
/// of objects with the three required string fields.
pub fn parse_tasks(text: &str) -> Result<Vec<ExtractedTask>, ExtractError> {
    serde_json::from_str(strip_fence(text))
        .map_err(|e| ExtractError::MalformedOutput(e.to_string()))
}

fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[test]
    fn parses_task_array() {
        let text = r#"[{"project_category":"PII Detection","accomplishment":"Validated package","key_insight":"Package is stable"},{"project_category":"Infra","accomplishment":"Rotated keys","key_insight":"N/A"}]"#;
        let tasks = parse_response(&envelope(text)).unwrap();
        assert_eq!(
            tasks,
            vec![
                ExtractedTask {
                    project_category: "PII Detection".into(),
                    accomplishment: "Validated package".into(),
                    key_insight: "Package is stable".into(),
                },
                ExtractedTask {
                    project_category: "Infra".into(),
                    accomplishment: "Rotated keys".into(),
                    key_insight: "N/A".into(),
                },
            ]
        );
    }

    #[test]
    fn empty_array_is_not_an_error_here() {
        assert!(parse_response(&envelope("[]")).unwrap().is_empty());
    }

    #[test]
    fn text_split_across_parts_is_joined() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "[{\"project_category\":\"A\"," },
                    { "text": "\"accomplishment\":\"B\",\"key_insight\":\"C\"}]" }
                ]}
            }]
        })
        .to_string();
        assert_eq!(parse_response(&body).unwrap().len(), 1);
    }

    #[test]
    fn fenced_output_is_accepted() {
        let text = "```json\n[{\"project_category\":\"A\",\"accomplishment\":\"B\",\"key_insight\":\"C\"}]\n```";
        assert_eq!(parse_tasks(text).unwrap()[0].project_category, "A");
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = parse_tasks(r#"[{"project_category":"A","accomplishment":"B"}]"#).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedOutput(ref m) if m.contains("key_insight")));
    }

    #[test]
    fn object_instead_of_array_is_malformed() {
        let err = parse_tasks(r#"{"project_category":"A","accomplishment":"B","key_insight":"C"}"#)
            .unwrap_err();
        assert!(matches!(err, ExtractError::MalformedOutput(_)));
    }

    #[test]
    fn no_candidates_reports_block_reason() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(err, ExtractError::NoCandidate(ref m) if m.contains("SAFETY")));
    }

    #[test]
    fn candidate_without_text_is_no_candidate() {
        let body = json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] }).to_string();
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(err, ExtractError::NoCandidate(ref m) if m.contains("MAX_TOKENS")));
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert!(matches!(
            parse_response("<html>").unwrap_err(),
            ExtractError::MalformedOutput(_)
        ));
    }
}
