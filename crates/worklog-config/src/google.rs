//! Google service-account credentials.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleConfig {
    /// Path to a service-account key file (JSON).
    #[serde(default)]
    pub credentials_path: String,

    /// Inline service-account key JSON. Takes precedence over the path.
    #[serde(default)]
    pub credentials_json: String,

    /// Token endpoint override. Empty means use the one in the key.
    #[serde(default)]
    pub token_uri: String,
}

impl GoogleConfig {
    /// Check if either credential source is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.credentials_json.trim().is_empty() || !self.credentials_path.trim().is_empty()
    }

    /// Whether the inline key should be used.
    #[must_use]
    pub fn has_inline_credentials(&self) -> bool {
        !self.credentials_json.trim().is_empty()
    }
}
