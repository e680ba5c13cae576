//! # worklog-config
//!
//! Layered configuration loading for worklog using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WORKLOG_*` prefix, `__` as separator)
//! 2. Project-level `.worklog/config.toml`
//! 3. User-level `~/.config/worklog/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WORKLOG_SHEET__TAB_NAME` -> `sheet.tab_name`,
//! `WORKLOG_EXTRACTOR__API_KEY` -> `extractor.api_key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use worklog_config::WorklogConfig;
//!
//! let config = WorklogConfig::load_with_dotenv().expect("config");
//! println!("writing to {} / {}", config.sheet.document_name, config.sheet.tab_name);
//! ```

mod error;
mod extractor;
mod general;
mod google;
mod sheet;

pub use error::ConfigError;
pub use extractor::ExtractorConfig;
pub use general::GeneralConfig;
pub use google::GoogleConfig;
pub use sheet::SheetConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorklogConfig {
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl WorklogConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.extractor.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".worklog/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("WORKLOG_").split("__"))
    }

    /// Require Google credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the `google` section.
    pub fn require_google(&self) -> Result<&GoogleConfig, ConfigError> {
        if self.google.is_configured() {
            Ok(&self.google)
        } else {
            Err(ConfigError::NotConfigured {
                section: "google".into(),
            })
        }
    }

    /// Require an extraction-service API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the `extractor` section.
    pub fn require_extractor(&self) -> Result<&ExtractorConfig, ConfigError> {
        if self.extractor.is_configured() {
            Ok(&self.extractor)
        } else {
            Err(ConfigError::NotConfigured {
                section: "extractor".into(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("worklog").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = WorklogConfig::default();
        assert!(!config.google.is_configured());
        assert!(!config.extractor.is_configured());
        assert!(config.general.show_recent);
        assert_eq!(config.sheet.tab_name, "Sheet1");
    }

    #[test]
    fn require_reports_missing_section() {
        let config = WorklogConfig::default();
        let err = config.require_google().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "google"));
        assert!(config.require_extractor().is_err());
    }
}
