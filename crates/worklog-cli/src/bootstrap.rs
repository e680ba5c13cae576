use anyhow::Context;
use worklog_config::WorklogConfig;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<WorklogConfig> {
    let config = WorklogConfig::load_with_dotenv().context("failed to load worklog configuration")?;

    if !config.google.is_configured() {
        tracing::debug!("google credentials not configured");
    }
    if !config.extractor.is_configured() {
        tracing::debug!("extractor API key not configured; summary mode unavailable");
    }
    Ok(config)
}
