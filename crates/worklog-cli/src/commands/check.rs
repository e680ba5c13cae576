use serde::Serialize;
use worklog_config::WorklogConfig;
use worklog_sheets::{ConnectionManager, GoogleSheetsClient, SheetTarget};

use crate::cli::GlobalFlags;
use crate::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct CheckReport {
    document: String,
    tab: String,
    tab_id: i64,
    spreadsheet_id: String,
    service_account: String,
    extractor_configured: bool,
}

/// Connect once and print what the configuration resolves to.
pub async fn handle(config: &WorklogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = GoogleSheetsClient::from_config(config.require_google()?)?;
    let service_account = client.client_email().to_string();
    let mut manager = ConnectionManager::new(client, SheetTarget::from(&config.sheet));

    let progress = Progress::spinner("Connecting to Google Sheets...");
    let result = manager.acquire().await.map(|(_, handle)| handle.clone());
    progress.finish_clear();
    let handle = result?;

    output::output(
        &CheckReport {
            document: handle.document_title,
            tab: handle.tab_title,
            tab_id: handle.tab_id,
            spreadsheet_id: handle.spreadsheet_id,
            service_account,
            extractor_configured: config.extractor.is_configured(),
        },
        flags.format,
    )
}
