//! Interactive submission loop shared by `paste` and `summary`.
//!
//! A submission is every line typed up to the next empty line (or EOF),
//! except that pasted CSV keeps going while a quoted field is still open.
//! `:q` or `quit` on the first line ends the session. Each submission is
//! normalized (or extracted, then normalized), appended, and reported before
//! the next prompt. Connection failures end the session; every other failure
//! is reported and the loop continues.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use worklog_core::{Clock, WorkLogRecord, normalize_delimited, normalize_extracted};
use worklog_extract::SummaryExtractor;
use worklog_sheets::{
    ConnectionManager, Connector, SheetStore, SheetWriter, SheetsError, WriteOutcome,
};

use crate::cli::OutputFormat;
use crate::output;
use crate::progress::Progress;
use crate::ui;

/// One unit of user input.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Submission(String),
    Quit,
}

/// Read the next submission from `lines`.
///
/// With `csv_quotes` set, an empty line inside an open double-quoted field
/// belongs to that field and does not end the submission.
pub async fn read_submission<R>(
    lines: &mut Lines<R>,
    csv_quotes: bool,
) -> std::io::Result<Input>
where
    R: AsyncBufRead + Unpin,
{
    let mut buffer: Vec<String> = Vec::new();
    let mut open_quote = false;
    loop {
        let Some(line) = lines.next_line().await? else {
            return Ok(if buffer.is_empty() {
                Input::Quit
            } else {
                Input::Submission(buffer.join("\n"))
            });
        };

        let trimmed = line.trim();
        if buffer.is_empty() && is_quit(trimmed) {
            return Ok(Input::Quit);
        }
        if trimmed.is_empty() && !open_quote {
            return Ok(Input::Submission(buffer.join("\n")));
        }
        if csv_quotes && line.matches('"').count() % 2 == 1 {
            open_quote = !open_quote;
        }
        buffer.push(line);
    }
}

fn is_quit(line: &str) -> bool {
    line == ":q" || line.eq_ignore_ascii_case("quit")
}

/// Where records come from.
pub enum Source {
    /// Comma-separated rows, 3 or 4 columns.
    Paste,
    /// Free text sent to the extraction service.
    Summary(SummaryExtractor),
}

impl Source {
    const fn prompt(&self) -> &'static str {
        match self {
            Self::Paste => "Paste CSV rows (3 or 4 columns), then an empty line. `:q` to quit.\n> ",
            Self::Summary(_) => "Describe what you worked on, then an empty line. `:q` to quit.\n> ",
        }
    }

    const fn csv_quotes(&self) -> bool {
        matches!(self, Self::Paste)
    }

    const fn blank_warning(&self) -> &'static str {
        match self {
            Self::Paste => "Please paste some data before saving.",
            Self::Summary(_) => "Please write a summary before saving.",
        }
    }

    async fn records(&self, text: &str, clock: &impl Clock) -> anyhow::Result<Vec<WorkLogRecord>> {
        match self {
            Self::Paste => Ok(normalize_delimited(text, clock)?),
            Self::Summary(extractor) => {
                let progress = Progress::spinner("Extracting tasks from your summary...");
                let tasks = extractor.extract(text).await;
                progress.finish_clear();
                Ok(normalize_extracted(tasks?, clock)?)
            }
        }
    }
}

/// Result of one submission.
#[derive(Debug)]
pub enum Submitted {
    /// Nothing but whitespace; no remote call was made.
    Blank,
    Saved {
        records: Vec<WorkLogRecord>,
        outcome: WriteOutcome,
    },
}

/// True for failures that end the session.
#[must_use]
pub fn is_terminal(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<SheetsError>()
        .is_some_and(SheetsError::is_connection_failure)
}

pub struct Session<C, K> {
    manager: ConnectionManager<C>,
    source: Source,
    writer: SheetWriter,
    clock: K,
}

impl<C, K> Session<C, K>
where
    C: Connector + SheetStore,
    K: Clock,
{
    pub fn new(manager: ConnectionManager<C>, source: Source, clock: K) -> Self {
        Self {
            manager,
            source,
            writer: SheetWriter::new(),
            clock,
        }
    }

    /// Open the sheet up front so configuration problems surface before
    /// the user types anything.
    pub async fn connect(&mut self) -> Result<(), SheetsError> {
        let progress = Progress::spinner("Connecting to Google Sheets...");
        let result = self.manager.acquire().await.map(|(_, handle)| {
            format!(
                "Connected to '{}' / '{}'",
                handle.document_title, handle.tab_title
            )
        });
        progress.finish_clear();
        ui::success(&result?);
        Ok(())
    }

    /// Handle one submission end to end.
    pub async fn submit(&mut self, text: &str) -> anyhow::Result<Submitted> {
        if text.trim().is_empty() {
            return Ok(Submitted::Blank);
        }

        let records = self.source.records(text, &self.clock).await?;

        let progress = Progress::spinner(&format!("Appending {} record(s)...", records.len()));
        let result = match self.manager.acquire().await {
            Ok((store, handle)) => self.writer.append(store, handle, &records).await,
            Err(error) => Err(error),
        };
        progress.finish_clear();

        match result {
            Ok(outcome) => Ok(Submitted::Saved { records, outcome }),
            Err(error) => {
                if matches!(error, SheetsError::Write(_)) {
                    self.manager.invalidate();
                }
                Err(error.into())
            }
        }
    }

    /// Prompt, submit, report; repeat until quit or a terminal failure.
    pub async fn run<R>(
        &mut self,
        input: R,
        format: OutputFormat,
        show_recent: bool,
    ) -> anyhow::Result<usize>
    where
        R: AsyncBufRead + Unpin,
    {
        self.connect().await?;

        let mut lines = input.lines();
        let mut saved = 0;
        loop {
            ui::prompt(self.source.prompt());
            let csv_quotes = self.source.csv_quotes();
            let Input::Submission(text) = read_submission(&mut lines, csv_quotes).await? else {
                break;
            };

            match self.submit(&text).await {
                Ok(Submitted::Blank) => ui::warn(self.source.blank_warning()),
                Ok(Submitted::Saved { records, outcome }) => {
                    saved += outcome.rows_written;
                    report(&records, &outcome, &self.manager, format, show_recent)?;
                }
                Err(error) if is_terminal(&error) => return Err(error),
                Err(error) => ui::error(&format!("{error:#}")),
            }
        }

        ui::info(&format!("Saved {saved} record(s) this session."));
        Ok(saved)
    }

    pub const fn manager(&self) -> &ConnectionManager<C> {
        &self.manager
    }
}

fn report<C: Connector>(
    records: &[WorkLogRecord],
    outcome: &WriteOutcome,
    manager: &ConnectionManager<C>,
    format: OutputFormat,
    show_recent: bool,
) -> anyhow::Result<()> {
    if outcome.header_written {
        ui::info("Sheet was empty. Wrote the header row first.");
    }
    let document = manager
        .cached()
        .map_or(manager.target().document_name.as_str(), |handle| {
            handle.document_title.as_str()
        });
    ui::success(&format!(
        "Saved {} new record(s) to Google Sheet '{document}'",
        outcome.rows_written
    ));
    if let Some(warning) = &outcome.format_warning {
        ui::warn(warning);
    }
    if show_recent {
        ui::info("Recently added:");
        output::records(records, format)?;
    }
    Ok(())
}
