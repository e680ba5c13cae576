use anyhow::Context;
use worklog_config::WorklogConfig;
use worklog_core::SystemClock;
use worklog_extract::SummaryExtractor;
use worklog_sheets::{ConnectionManager, GoogleSheetsClient, SheetTarget};

use crate::cli::GlobalFlags;
use crate::session::{Session, Source};

pub async fn handle_paste(config: &WorklogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    run(Source::Paste, config, flags).await
}

pub async fn handle_summary(config: &WorklogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let extractor_config = config
        .require_extractor()
        .context("summary mode needs an extraction API key")?;
    let extractor = SummaryExtractor::new(extractor_config.clone())?;
    tracing::debug!(model = extractor.model(), "summary extractor ready");
    run(Source::Summary(extractor), config, flags).await
}

async fn run(source: Source, config: &WorklogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = GoogleSheetsClient::from_config(config.require_google()?)?;
    tracing::debug!(service_account = client.client_email(), "google client ready");

    let manager = ConnectionManager::new(client, SheetTarget::from(&config.sheet));
    let mut session = Session::new(manager, source, SystemClock);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session
        .run(stdin, flags.format, config.general.show_recent)
        .await?;
    Ok(())
}
