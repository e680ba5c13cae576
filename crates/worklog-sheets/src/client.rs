//! Google Sheets / Drive HTTP client.
//!
//! Implements [`Connector`] (open document by name or id, then tab) and
//! [`SheetStore`] (read, append, format) on top of the REST APIs.

use reqwest::Url;
use serde::Deserialize;
use serde_json::{Value, json};
use worklog_config::GoogleConfig;

use crate::auth::{ServiceAccountKey, TokenProvider};
use crate::error::SheetsError;
use crate::format::SheetFormatting;
use crate::http::check_response;
use crate::store::{Connector, SheetHandle, SheetStore, SheetTarget, ValueInputOption};

const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_FILES: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Spreadsheet {
    spreadsheet_id: String,
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<Tab>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct Tab {
    properties: TabProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TabProperties {
    #[serde(default)]
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Authenticated client for one service account.
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    tokens: TokenProvider,
}

impl GoogleSheetsClient {
    /// Build a client for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Connection`] if the HTTP client cannot be built.
    pub fn new(key: ServiceAccountKey) -> Result<Self, SheetsError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("worklog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SheetsError::Connection(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            tokens: TokenProvider::new(key, http.clone()),
            http,
        })
    }

    /// Build a client from the `google` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Credential`] if the key cannot be loaded.
    pub fn from_config(config: &GoogleConfig) -> Result<Self, SheetsError> {
        Self::new(ServiceAccountKey::from_config(config)?)
    }

    /// Service-account address the sheet must be shared with.
    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.tokens.key().client_email
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, SheetsError> {
        let token = self.tokens.access_token().await?;
        let resp = self.http.get(url).bearer_auth(token).send().await?;
        check_response(resp).await
    }

    async fn post(&self, url: Url, body: &Value) -> Result<reqwest::Response, SheetsError> {
        let token = self.tokens.access_token().await?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        check_response(resp).await
    }

    /// Look a spreadsheet up by exact title through Drive. First match wins.
    async fn find_spreadsheet_id(&self, name: &str) -> Result<Option<String>, SheetsError> {
        let query = drive_name_query(name);
        let url = Url::parse_with_params(
            DRIVE_FILES,
            &[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "10"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ],
        )
        .map_err(|e| SheetsError::Parse(format!("drive url: {e}")))?;

        let list: FileList = self.get(url).await?.json().await?;
        tracing::debug!(name, matches = list.files.len(), "drive lookup");
        Ok(list.files.into_iter().next().map(|file| {
            tracing::debug!(id = %file.id, title = %file.name, "opening spreadsheet");
            file.id
        }))
    }

    async fn spreadsheet(&self, id: &str) -> Result<Spreadsheet, SheetsError> {
        let url = Url::parse_with_params(
            &format!("{SHEETS_BASE}/{}", urlencoding::encode(id)),
            &[(
                "fields",
                "spreadsheetId,properties.title,sheets.properties(sheetId,title)",
            )],
        )
        .map_err(|e| SheetsError::Parse(format!("spreadsheet url: {e}")))?;
        Ok(self.get(url).await?.json().await?)
    }

    fn values_url(handle: &SheetHandle, range: &str, suffix: &str) -> Result<Url, SheetsError> {
        Url::parse(&format!(
            "{SHEETS_BASE}/{}/values/{}{suffix}",
            urlencoding::encode(&handle.spreadsheet_id),
            urlencoding::encode(range),
        ))
        .map_err(|e| SheetsError::Parse(format!("values url: {e}")))
    }
}

impl Connector for GoogleSheetsClient {
    async fn connect(&self, target: &SheetTarget) -> Result<SheetHandle, SheetsError> {
        self.tokens.access_token().await?;

        let id = match &target.spreadsheet_id {
            Some(id) => id.clone(),
            None => self
                .find_spreadsheet_id(&target.document_name)
                .await
                .map_err(classify_lookup_error)?
                .ok_or_else(|| SheetsError::DocumentNotFound {
                    name: target.document_name.clone(),
                })?,
        };

        let label = target.spreadsheet_id.as_ref().unwrap_or(&target.document_name);
        let spreadsheet = self
            .spreadsheet(&id)
            .await
            .map_err(|e| classify_open_error(e, label))?;

        resolve_tab(spreadsheet, &target.tab_name)
    }
}

impl SheetStore for GoogleSheetsClient {
    async fn read_all_rows(&self, handle: &SheetHandle) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = Self::values_url(handle, &handle.whole_tab_range(), "")?;
        let range: ValueRange = self.get(url).await?.json().await?;
        Ok(range
            .values
            .into_iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    async fn append_rows(
        &self,
        handle: &SheetHandle,
        rows: &[Vec<String>],
        input: ValueInputOption,
    ) -> Result<(), SheetsError> {
        let mut url = Self::values_url(handle, &handle.append_range(), ":append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", input.as_str())
            .append_pair("insertDataOption", "INSERT_ROWS");

        let body = json!({ "majorDimension": "ROWS", "values": rows });
        self.post(url, &body).await?;
        tracing::debug!(rows = rows.len(), tab = %handle.tab_title, "append accepted");
        Ok(())
    }

    async fn apply_formatting(
        &self,
        handle: &SheetHandle,
        formatting: &SheetFormatting,
    ) -> Result<(), SheetsError> {
        let url = Url::parse(&format!(
            "{SHEETS_BASE}/{}:batchUpdate",
            urlencoding::encode(&handle.spreadsheet_id)
        ))
        .map_err(|e| SheetsError::Parse(format!("batchUpdate url: {e}")))?;

        let body = json!({ "requests": formatting.requests(handle.tab_id) });
        self.post(url, &body).await?;
        Ok(())
    }
}

/// Drive `q` expression matching a spreadsheet title exactly.
fn drive_name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name = '{escaped}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false")
}

/// Map a Drive lookup failure to the connection taxonomy. A document the
/// account cannot see is an empty result, not an error, so a 403 here means
/// the Drive API or its scope is unavailable.
fn classify_lookup_error(error: SheetsError) -> SheetsError {
    match error {
        SheetsError::Api {
            status: 401,
            message,
        } => SheetsError::Credential(message),
        SheetsError::Api { status, message } => SheetsError::Connection(format!(
            "error opening spreadsheet: drive lookup failed ({status}): {message}"
        )),
        SheetsError::Http(e) => {
            SheetsError::Connection(format!("error opening spreadsheet: {e}"))
        }
        SheetsError::Parse(message) => {
            SheetsError::Connection(format!("error opening spreadsheet: {message}"))
        }
        other => other,
    }
}

/// Map a `spreadsheets.get` failure to the connection taxonomy.
fn classify_open_error(error: SheetsError, name: &str) -> SheetsError {
    match error {
        SheetsError::Api {
            status: 403 | 404, ..
        } => SheetsError::DocumentNotFound {
            name: name.to_string(),
        },
        SheetsError::Api {
            status: 401,
            message,
        } => SheetsError::Credential(message),
        SheetsError::Http(e) => SheetsError::Connection(e.to_string()),
        SheetsError::Api { status, message } => {
            SheetsError::Connection(format!("API error ({status}): {message}"))
        }
        SheetsError::Parse(message) => SheetsError::Connection(message),
        other => other,
    }
}

/// Pick the tab with exactly `tab_name` as its title.
fn resolve_tab(spreadsheet: Spreadsheet, tab_name: &str) -> Result<SheetHandle, SheetsError> {
    let Spreadsheet {
        spreadsheet_id,
        properties,
        sheets,
    } = spreadsheet;

    sheets
        .into_iter()
        .map(|tab| tab.properties)
        .find(|props| props.title == tab_name)
        .map(|props| SheetHandle {
            spreadsheet_id: spreadsheet_id.clone(),
            document_title: properties.title.clone(),
            tab_title: props.title,
            tab_id: props.sheet_id,
        })
        .ok_or_else(|| SheetsError::TabNotFound {
            document: properties.title.clone(),
            tab: tab_name.to_string(),
        })
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn spreadsheet_json() -> Spreadsheet {
        serde_json::from_value(json!({
            "spreadsheetId": "1AbC",
            "properties": { "title": "Daily Work Log" },
            "sheets": [
                { "properties": { "sheetId": 0, "title": "Sheet1" } },
                { "properties": { "sheetId": 77, "title": "Archive" } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn resolves_tab_by_exact_title() {
        let handle = resolve_tab(spreadsheet_json(), "Archive").unwrap();
        assert_eq!(
            handle,
            SheetHandle {
                spreadsheet_id: "1AbC".into(),
                document_title: "Daily Work Log".into(),
                tab_title: "Archive".into(),
                tab_id: 77,
            }
        );
    }

    #[test]
    fn tab_lookup_is_case_sensitive() {
        let err = resolve_tab(spreadsheet_json(), "sheet1").unwrap_err();
        assert!(matches!(
            err,
            SheetsError::TabNotFound { ref document, ref tab } if document == "Daily Work Log" && tab == "sheet1"
        ));
    }

    #[test]
    fn first_tab_without_sheet_id_defaults_to_zero() {
        let spreadsheet: Spreadsheet = serde_json::from_value(json!({
            "spreadsheetId": "x",
            "properties": { "title": "Log" },
            "sheets": [{ "properties": { "title": "Sheet1" } }]
        }))
        .unwrap();
        assert_eq!(resolve_tab(spreadsheet, "Sheet1").unwrap().tab_id, 0);
    }

    #[test]
    fn drive_query_escapes_quotes() {
        assert_eq!(
            drive_name_query("Bob's Log"),
            "name = 'Bob\\'s Log' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false"
        );
    }

    #[rstest]
    #[case(403, true)]
    #[case(404, true)]
    #[case(500, false)]
    fn open_errors_are_classified(#[case] status: u16, #[case] not_found: bool) {
        let err = classify_open_error(
            SheetsError::Api {
                status,
                message: "nope".into(),
            },
            "Daily Work Log",
        );
        assert_eq!(
            matches!(err, SheetsError::DocumentNotFound { .. }),
            not_found
        );
        assert!(err.is_connection_failure());
    }

    #[rstest]
    #[case(403)]
    #[case(404)]
    #[case(500)]
    fn drive_lookup_errors_are_connection_failures(#[case] status: u16) {
        let err = classify_lookup_error(SheetsError::Api {
            status,
            message: "Google Drive API has not been used in project 123 before or it is disabled."
                .into(),
        });
        assert!(matches!(err, SheetsError::Connection(_)));
        assert!(err.is_connection_failure());
        let text = err.to_string();
        assert!(text.contains("error opening spreadsheet"));
        assert!(text.contains("Drive API has not been used"));
        assert!(!text.contains("shared with the service account"));
    }

    #[test]
    fn drive_lookup_unauthorized_is_a_credential_failure() {
        let err = classify_lookup_error(SheetsError::Api {
            status: 401,
            message: "invalid token".into(),
        });
        assert!(matches!(err, SheetsError::Credential(ref m) if m == "invalid token"));
    }

    #[test]
    fn cells_become_text() {
        let range: ValueRange = serde_json::from_value(json!({
            "range": "Sheet1!A1:D2",
            "values": [["Date", "Project / Category"], [45954, null, true]]
        }))
        .unwrap();
        let rows: Vec<Vec<String>> = range
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        assert_eq!(rows[1], vec!["45954", "", "true"]);
    }

    #[test]
    fn empty_value_range_has_no_rows() {
        let range: ValueRange =
            serde_json::from_value(json!({ "range": "Sheet1!A1:Z1000", "majorDimension": "ROWS" }))
                .unwrap();
        assert!(range.values.is_empty());
    }

    #[test]
    fn values_url_encodes_range() {
        let handle = SheetHandle {
            spreadsheet_id: "1AbC".into(),
            document_title: "Daily Work Log".into(),
            tab_title: "My Tab".into(),
            tab_id: 0,
        };
        let url =
            GoogleSheetsClient::values_url(&handle, &handle.append_range(), ":append").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/1AbC/values/%27My%20Tab%27%21A1:append"
        );
    }

    #[tokio::test]
    #[ignore] // requires network + WORKLOG_GOOGLE__CREDENTIALS_PATH
    async fn live_connect_and_read() {
        let config = worklog_config::WorklogConfig::load_with_dotenv().expect("config");
        let client = GoogleSheetsClient::from_config(&config.google).expect("client");
        let handle = client
            .connect(&SheetTarget::from(&config.sheet))
            .await
            .expect("connect");
        let rows = client.read_all_rows(&handle).await.expect("read");
        println!("{} rows in {}/{}", rows.len(), handle.document_title, handle.tab_title);
    }
}
