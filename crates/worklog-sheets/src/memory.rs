//! In-memory sheet backend.
//!
//! Behaves like the Google backend for documents, tabs and rows, records
//! formatting calls, and can be told to fail individual operations. Used to
//! exercise the writer and connection manager without network access.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::SheetsError;
use crate::format::SheetFormatting;
use crate::store::{Connector, SheetHandle, SheetStore, SheetTarget, ValueInputOption};

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    Connect,
    Read,
    Append,
    Format,
}

#[derive(Debug, Default)]
struct MemoryTab {
    id: i64,
    rows: Vec<Vec<String>>,
    formatted: u32,
}

#[derive(Debug, Default)]
struct MemoryDocument {
    id: String,
    tabs: BTreeMap<String, MemoryTab>,
}

#[derive(Debug, Default)]
struct State {
    documents: BTreeMap<String, MemoryDocument>,
    failing: Vec<Operation>,
    connect_calls: usize,
    last_input: Option<ValueInputOption>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with empty tabs.
    #[must_use]
    pub fn with_document(self, name: &str, tabs: &[&str]) -> Self {
        {
            let mut state = self.lock();
            let id = format!("mem-{}", state.documents.len() + 1);
            let tabs = tabs
                .iter()
                .zip(0_i64..)
                .map(|(title, id)| {
                    (
                        (*title).to_string(),
                        MemoryTab {
                            id,
                            ..MemoryTab::default()
                        },
                    )
                })
                .collect();
            state
                .documents
                .insert(name.to_string(), MemoryDocument { id, tabs });
        }
        self
    }

    /// Seed a tab with existing rows.
    #[must_use]
    pub fn with_rows(self, document: &str, tab: &str, rows: &[&[&str]]) -> Self {
        {
            let mut state = self.lock();
            if let Some(tab) = state
                .documents
                .get_mut(document)
                .and_then(|doc| doc.tabs.get_mut(tab))
            {
                tab.rows.extend(
                    rows.iter()
                        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect()),
                );
            }
        }
        self
    }

    /// Make `operation` fail (or succeed again) until changed.
    pub fn fail(&self, operation: Operation, failing: bool) {
        let mut state = self.lock();
        state.failing.retain(|op| *op != operation);
        if failing {
            state.failing.push(operation);
        }
    }

    /// Rows currently on a tab.
    #[must_use]
    pub fn rows(&self, document: &str, tab: &str) -> Vec<Vec<String>> {
        self.lock()
            .documents
            .get(document)
            .and_then(|doc| doc.tabs.get(tab))
            .map(|tab| tab.rows.clone())
            .unwrap_or_default()
    }

    /// How many times formatting was applied to a tab.
    #[must_use]
    pub fn format_calls(&self, document: &str, tab: &str) -> u32 {
        self.lock()
            .documents
            .get(document)
            .and_then(|doc| doc.tabs.get(tab))
            .map_or(0, |tab| tab.formatted)
    }

    #[must_use]
    pub fn connect_calls(&self) -> usize {
        self.lock().connect_calls
    }

    /// Input option used by the most recent append.
    #[must_use]
    pub fn last_input(&self) -> Option<ValueInputOption> {
        self.lock().last_input
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(state: &State, operation: Operation) -> Result<(), SheetsError> {
        if !state.failing.contains(&operation) {
            return Ok(());
        }
        Err(match operation {
            Operation::Connect => SheetsError::Connection("simulated outage".into()),
            _ => SheetsError::Api {
                status: 503,
                message: format!("simulated {operation:?} failure"),
            },
        })
    }

    fn tab_mut<'a>(
        state: &'a mut State,
        handle: &SheetHandle,
    ) -> Result<&'a mut MemoryTab, SheetsError> {
        state
            .documents
            .get_mut(&handle.document_title)
            .and_then(|doc| doc.tabs.get_mut(&handle.tab_title))
            .ok_or_else(|| SheetsError::Api {
                status: 404,
                message: format!("no tab '{}'", handle.tab_title),
            })
    }
}

impl Connector for MemoryStore {
    async fn connect(&self, target: &SheetTarget) -> Result<SheetHandle, SheetsError> {
        let mut state = self.lock();
        state.connect_calls += 1;
        Self::check(&state, Operation::Connect)?;

        let (title, document) = state
            .documents
            .iter()
            .find(|(title, doc)| match &target.spreadsheet_id {
                Some(id) => &doc.id == id,
                None => *title == &target.document_name,
            })
            .ok_or_else(|| SheetsError::DocumentNotFound {
                name: target
                    .spreadsheet_id
                    .clone()
                    .unwrap_or_else(|| target.document_name.clone()),
            })?;

        let tab = document
            .tabs
            .get(&target.tab_name)
            .ok_or_else(|| SheetsError::TabNotFound {
                document: title.clone(),
                tab: target.tab_name.clone(),
            })?;

        Ok(SheetHandle {
            spreadsheet_id: document.id.clone(),
            document_title: title.clone(),
            tab_title: target.tab_name.clone(),
            tab_id: tab.id,
        })
    }
}

impl SheetStore for MemoryStore {
    async fn read_all_rows(&self, handle: &SheetHandle) -> Result<Vec<Vec<String>>, SheetsError> {
        let mut state = self.lock();
        Self::check(&state, Operation::Read)?;
        Ok(Self::tab_mut(&mut state, handle)?.rows.clone())
    }

    async fn append_rows(
        &self,
        handle: &SheetHandle,
        rows: &[Vec<String>],
        input: ValueInputOption,
    ) -> Result<(), SheetsError> {
        let mut state = self.lock();
        Self::check(&state, Operation::Append)?;
        state.last_input = Some(input);
        Self::tab_mut(&mut state, handle)?
            .rows
            .extend(rows.iter().cloned());
        Ok(())
    }

    async fn apply_formatting(
        &self,
        handle: &SheetHandle,
        _formatting: &SheetFormatting,
    ) -> Result<(), SheetsError> {
        let mut state = self.lock();
        Self::check(&state, Operation::Format)?;
        Self::tab_mut(&mut state, handle)?.formatted += 1;
        Ok(())
    }
}
