//! Summary extraction service (Gemini) configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_model() -> String {
    String::from("gemini-2.5-flash")
}

fn default_endpoint() -> String {
    String::from("https://generativelanguage.googleapis.com")
}

const fn default_temperature() -> f32 {
    0.1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractorConfig {
    /// API key sent as `x-goog-api-key`.
    #[serde(default)]
    pub api_key: String,

    /// Model name, e.g. `gemini-2.5-flash`.
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Sampling temperature. Kept low so extraction is close to deterministic.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
        }
    }
}

impl ExtractorConfig {
    /// Check if an API key is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Reject values the service would refuse.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a temperature outside
    /// `0.0..=2.0` or an empty model name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "extractor.temperature".into(),
                reason: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extractor.model".into(),
                reason: "model name is empty".into(),
            });
        }
        Ok(())
    }
}
