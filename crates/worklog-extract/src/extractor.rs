//! Gemini-backed summary extractor.

use worklog_config::ExtractorConfig;
use worklog_core::ExtractedTask;

use crate::error::ExtractError;
use crate::http::check_response;
use crate::prompt::request_body;
use crate::response::parse_response;

/// Sends a free-text paragraph to the extraction service and returns the
/// tasks it found. Each call is a single request; failures are not retried
/// and no timeout is set beyond the transport's own.
pub struct SummaryExtractor {
    http: reqwest::Client,
    config: ExtractorConfig,
}

impl SummaryExtractor {
    /// Build an extractor from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::NotConfigured`] when no API key is set and
    /// [`ExtractError::Unreachable`] if the HTTP client cannot be built.
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractError> {
        if !config.is_configured() {
            return Err(ExtractError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("worklog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// `{endpoint}/v1beta/models/{model}:generateContent`
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model.trim()
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Extract tasks from `text`.
    ///
    /// An empty result is returned as `Ok(vec![])`; rejecting it is left to
    /// the normalizer.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::BlankInput`] without a request for blank
    /// text, and any transport, status, or output-shape failure otherwise.
    pub async fn extract(&self, text: &str) -> Result<Vec<ExtractedTask>, ExtractError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ExtractError::BlankInput);
        }

        tracing::debug!(model = %self.config.model, chars = text.len(), "extracting tasks");
        let resp = self
            .http
            .post(self.url())
            .header("x-goog-api-key", self.config.api_key.trim())
            .json(&request_body(text, self.config.temperature))
            .send()
            .await?;
        let body = check_response(resp).await?.text().await?;

        let tasks = parse_response(&body)?;
        tracing::info!(tasks = tasks.len(), "extraction complete");
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExtractorConfig {
        ExtractorConfig {
            api_key: "test-key".into(),
            ..ExtractorConfig::default()
        }
    }

    #[test]
    fn missing_key_is_not_configured() {
        let err = SummaryExtractor::new(ExtractorConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, ExtractError::NotConfigured));
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let extractor = SummaryExtractor::new(ExtractorConfig {
            endpoint: "http://localhost:9999/".into(),
            ..config()
        })
        .unwrap();
        assert_eq!(
            extractor.url(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(extractor.model(), "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn blank_text_is_rejected_before_any_request() {
        // Unroutable endpoint: a request would fail with Unreachable instead.
        let extractor = SummaryExtractor::new(ExtractorConfig {
            endpoint: "http://127.0.0.1:1".into(),
            ..config()
        })
        .unwrap();
        let err = extractor.extract("  \n\t ").await.unwrap_err();
        assert!(matches!(err, ExtractError::BlankInput));
    }

    #[tokio::test]
    async fn unreachable_service_is_reported() {
        let extractor = SummaryExtractor::new(ExtractorConfig {
            endpoint: "http://127.0.0.1:1".into(),
            ..config()
        })
        .unwrap();
        let err = extractor.extract("Fixed CI.").await.unwrap_err();
        assert!(matches!(err, ExtractError::Unreachable(_)));
    }
}
