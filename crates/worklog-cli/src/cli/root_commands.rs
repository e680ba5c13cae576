use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Paste comma-separated rows (3 or 4 columns) and append them to the sheet.
    Paste,

    /// Describe your day in plain text; tasks are extracted and appended.
    Summary,

    /// Connect to the configured sheet and report what was resolved.
    Check,
}
