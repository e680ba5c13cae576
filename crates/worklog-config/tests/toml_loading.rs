//! Integration tests for TOML and environment configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use worklog_config::{ConfigError, WorklogConfig};

fn jailed_figment() -> Figment {
    Figment::from(Serialized::defaults(WorklogConfig::default()))
        .merge(Toml::file("config.toml"))
        .merge(Env::prefixed("WORKLOG_").split("__"))
}

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[sheet]
document_name = "Internship Log"
tab_name = "October"

[google]
credentials_path = "/secrets/key.json"

[extractor]
api_key = "gemini-key"
model = "gemini-2.5-pro"
temperature = 0.0

[general]
show_recent = false
"#,
        )?;

        let config = WorklogConfig::from_figment(&jailed_figment()).expect("config loads");

        assert_eq!(config.sheet.document_name, "Internship Log");
        assert_eq!(config.sheet.tab_name, "October");
        assert_eq!(config.google.credentials_path, "/secrets/key.json");
        assert!(config.google.is_configured());
        assert_eq!(config.extractor.api_key, "gemini-key");
        assert_eq!(config.extractor.model, "gemini-2.5-pro");
        assert_eq!(
            config.extractor.endpoint,
            "https://generativelanguage.googleapis.com"
        );
        assert!(!config.general.show_recent);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[sheet]
tab_name = "Log"
"#,
        )?;

        let config = WorklogConfig::from_figment(&jailed_figment()).expect("config loads");
        assert_eq!(config.sheet.document_name, "Daily Work Log");
        assert_eq!(config.sheet.tab_name, "Log");
        assert!(config.sheet.spreadsheet_id.is_empty());
        assert!(config.general.show_recent);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[sheet]
tab_name = "FromToml"
"#,
        )?;
        jail.set_env("WORKLOG_SHEET__TAB_NAME", "FromEnv");
        jail.set_env("WORKLOG_EXTRACTOR__API_KEY", "env-key");

        let config = WorklogConfig::from_figment(&jailed_figment()).expect("config loads");
        assert_eq!(config.sheet.tab_name, "FromEnv");
        assert!(config.extractor.is_configured());
        Ok(())
    });
}

#[test]
fn invalid_temperature_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[extractor]
temperature = 4.0
"#,
        )?;

        let err = WorklogConfig::from_figment(&jailed_figment()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[sheet\ntab_name = ")?;

        let err = WorklogConfig::from_figment(&jailed_figment()).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(".worklog").map_err(|e| e.to_string())?;
        jail.create_file(
            ".worklog/config.toml",
            r#"
[sheet]
spreadsheet_id = "1AbCdEf"
"#,
        )?;

        let config = WorklogConfig::load().expect("config loads");
        assert_eq!(config.sheet.spreadsheet_id, "1AbCdEf");
        assert!(config.sheet.has_spreadsheet_id());
        Ok(())
    });
}
