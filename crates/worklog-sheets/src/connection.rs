//! Connection manager.
//!
//! Owns the connector and the one cached [`SheetHandle`] for the process.
//! The handle is created on first use and reused until [`invalidate`] is
//! called after a failed operation; it is never re-validated proactively.
//!
//! [`invalidate`]: ConnectionManager::invalidate

use crate::error::SheetsError;
use crate::store::{Connector, SheetHandle, SheetTarget};

pub struct ConnectionManager<C> {
    connector: C,
    target: SheetTarget,
    handle: Option<SheetHandle>,
}

impl<C: Connector> ConnectionManager<C> {
    #[must_use]
    pub const fn new(connector: C, target: SheetTarget) -> Self {
        Self {
            connector,
            target,
            handle: None,
        }
    }

    /// Return the connector and the cached handle, connecting first if
    /// there is no handle yet.
    ///
    /// # Errors
    ///
    /// Returns the connector's failure (credential, document, tab, or
    /// connection) unchanged. Nothing is cached on failure.
    pub async fn acquire(&mut self) -> Result<(&C, &SheetHandle), SheetsError> {
        if self.handle.is_none() {
            tracing::debug!(
                document = %self.target.document_name,
                tab = %self.target.tab_name,
                "connecting"
            );
            let handle = self.connector.connect(&self.target).await?;
            tracing::info!(
                spreadsheet_id = %handle.spreadsheet_id,
                tab = %handle.tab_title,
                "connected"
            );
            self.handle = Some(handle);
        }

        match &self.handle {
            Some(handle) => Ok((&self.connector, handle)),
            None => Err(SheetsError::Connection("no sheet handle".into())),
        }
    }

    /// The cached handle, if any.
    #[must_use]
    pub const fn cached(&self) -> Option<&SheetHandle> {
        self.handle.as_ref()
    }

    /// Drop the cached handle so the next [`acquire`](Self::acquire) reconnects.
    pub fn invalidate(&mut self) {
        if self.handle.take().is_some() {
            tracing::debug!("sheet handle invalidated");
        }
    }

    #[must_use]
    pub const fn target(&self) -> &SheetTarget {
        &self.target
    }

    #[must_use]
    pub const fn connector(&self) -> &C {
        &self.connector
    }
}
