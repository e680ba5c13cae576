use worklog_config::WorklogConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod check;
pub mod log;

pub async fn dispatch(
    command: &Commands,
    config: &WorklogConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Paste => log::handle_paste(config, flags).await,
        Commands::Summary => log::handle_summary(config, flags).await,
        Commands::Check => check::handle(config, flags).await,
    }
}
