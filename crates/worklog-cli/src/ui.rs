use std::io::{IsTerminal, Write};
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub message_color: bool,
    pub progress: bool,
    pub quiet: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    let stdout_tty = std::io::stdout().is_terminal();
    let stderr_tty = std::io::stderr().is_terminal();

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = UI_PREFS.set(UiPrefs {
        table_color: stdout_tty && flags.format == OutputFormat::Table && !no_color,
        message_color: stderr_tty && !no_color,
        progress: stderr_tty && !flags.quiet,
        quiet: flags.quiet,
        term_width,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        message_color: false,
        progress: false,
        quiet: false,
        term_width: None,
    })
}

fn paint(text: &str, code: &str) -> String {
    if prefs().message_color {
        format!("\u{1b}[{code}m{text}\u{1b}[0m")
    } else {
        text.to_string()
    }
}

/// Progress note; suppressed by `--quiet`.
pub fn info(message: &str) {
    if !prefs().quiet {
        eprintln!("{}", paint(message, "2"));
    }
}

pub fn success(message: &str) {
    if !prefs().quiet {
        eprintln!("{} {message}", paint("✓", "32"));
    }
}

pub fn warn(message: &str) {
    eprintln!("{} {message}", paint("warning:", "33"));
}

pub fn error(message: &str) {
    eprintln!("{} {message}", paint("error:", "31"));
}

/// Print a prompt on stderr without a trailing newline.
pub fn prompt(text: &str) {
    if prefs().quiet {
        return;
    }
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "{}", paint(text, "1"));
    let _ = stderr.flush();
}
