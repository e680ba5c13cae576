//! Service-account authentication.
//!
//! Exchanges a signed RS256 assertion for a short-lived OAuth access token
//! (JWT bearer grant). The token is cached and reused until it is within
//! [`REFRESH_MARGIN_SECS`] of expiry.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use worklog_config::GoogleConfig;

use crate::error::SheetsError;
use crate::http::check_response;

/// OAuth scopes requested for the sheet and the name lookup.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    String::from(DEFAULT_TOKEN_URI)
}

/// The fields of a Google service-account key file that signing needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    private_key: String,
    #[serde(default)]
    private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

const fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text.
    ///
    /// Keys pasted into environment variables often carry literal `\n`
    /// sequences in the PEM; those are turned back into newlines.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Credential`] if the JSON is not a service-account key.
    pub fn from_json(json: &str) -> Result<Self, SheetsError> {
        let mut key: Self = serde_json::from_str(json)
            .map_err(|e| SheetsError::Credential(format!("invalid service-account key: {e}")))?;
        if key.private_key.contains("\\n") {
            key.private_key = key.private_key.replace("\\n", "\n");
        }
        if key.client_email.trim().is_empty() {
            return Err(SheetsError::Credential(
                "service-account key has an empty client_email".into(),
            ));
        }
        Ok(key)
    }

    /// Read and parse a key file.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Credential`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SheetsError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SheetsError::Credential(format!("cannot read key file {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Resolve the key from configuration. Inline JSON wins over the path;
    /// a configured `token_uri` replaces the one in the key.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Credential`] if neither source is configured or
    /// the configured one is unusable.
    pub fn from_config(config: &GoogleConfig) -> Result<Self, SheetsError> {
        let mut key = if config.has_inline_credentials() {
            Self::from_json(&config.credentials_json)?
        } else if config.is_configured() {
            Self::from_file(Path::new(config.credentials_path.trim()))?
        } else {
            return Err(SheetsError::Credential(
                "no service-account credentials configured (set google.credentials_path or google.credentials_json)".into(),
            ));
        };
        if !config.token_uri.trim().is_empty() {
            key.token_uri = config.token_uri.trim().to_string();
        }
        Ok(key)
    }

    /// Sign the bearer-grant assertion for `now`.
    fn assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.private_key_id);

        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SCOPES.join(" "),
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| SheetsError::Credential(format!("unusable private key: {e}")))?;
        jsonwebtoken::encode(&header, &claims, &key)
            .map_err(|e| SheetsError::Credential(format!("cannot sign assertion: {e}")))
    }
}

/// A bearer token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Usable at `now` with the refresh margin to spare.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Mints and caches access tokens for one service account.
pub struct TokenProvider {
    key: ServiceAccountKey,
    http: reqwest::Client,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    #[must_use]
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Self {
        Self {
            key,
            http,
            cached: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn key(&self) -> &ServiceAccountKey {
        &self.key
    }

    /// Return a fresh bearer token, exchanging a new assertion if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Credential`] if the key cannot sign or the token
    /// endpoint rejects it, and [`SheetsError::Connection`] if the endpoint
    /// cannot be reached.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        tracing::debug!(client_email = %self.key.client_email, "requesting access token");
        let token = self.exchange(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<AccessToken, SheetsError> {
        let assertion = self.key.assertion(now)?;
        let body = format!(
            "grant_type={}&assertion={}",
            urlencoding::encode(JWT_BEARER_GRANT),
            urlencoding::encode(&assertion)
        );

        let resp = self
            .http
            .post(&self.key.token_uri)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await
            .map_err(|e| SheetsError::Connection(format!("token endpoint unreachable: {e}")))?;

        let resp = check_response(resp).await.map_err(|e| match e {
            SheetsError::Api { status, message } if (400..500).contains(&status) => {
                SheetsError::Credential(format!("token request rejected ({status}): {message}"))
            }
            other => SheetsError::Connection(other.to_string()),
        })?;

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| SheetsError::Credential(format!("unexpected token response: {e}")))?;

        Ok(AccessToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}
