//! Ledger writer backed by Google Sheets.
//!
//! Every append authenticates with the service account, loads the document
//! metadata, picks the first sheet and appends one row matched to that
//! sheet's header row.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use crate::{
    config::SheetsConfig,
    error::{UpstreamError, check_status},
    models::ledger_row::LedgerRow,
    services::google_auth::{ServiceAccount, fetch_access_token},
};

/// Destination for transaction log rows.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Append one row to the transaction log.
    async fn append_row(&self, row: &LedgerRow) -> Result<(), UpstreamError>;
}

/// Google Sheets API v4 client appending to the first sheet of one document.
#[derive(Debug, Clone)]
pub struct GoogleSheetsLedger {
    http: reqwest::Client,
    account: ServiceAccount,
    sheet_id: String,
    token_url: String,
    api_url: Url,
}

#[derive(Debug, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
    #[serde(default)]
    index: u32,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl GoogleSheetsLedger {
    /// Build a client from configuration, sharing the given HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Url` if the Sheets API base URL is invalid.
    pub fn new(config: SheetsConfig, http: reqwest::Client) -> Result<Self, UpstreamError> {
        Ok(Self {
            http,
            account: ServiceAccount {
                client_email: config.client_email,
                private_key: config.private_key,
            },
            sheet_id: config.sheet_id,
            token_url: config.token_url,
            api_url: Url::parse(&config.api_url)?,
        })
    }

    /// `{api}/v4/spreadsheets/{id}[/values/{range}]`, with each segment percent-encoded.
    fn spreadsheet_url(&self, values_range: Option<&str>) -> Result<Url, UpstreamError> {
        let mut url = self.api_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.pop_if_empty().extend(["v4", "spreadsheets", self.sheet_id.as_str()]);
            if let Some(range) = values_range {
                segments.extend(["values", range]);
            }
        }
        Ok(url)
    }

    /// Title of the sheet at index 0.
    async fn first_sheet_title(&self, token: &str) -> Result<String, UpstreamError> {
        let mut url = self.spreadsheet_url(None)?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties");

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let spreadsheet: Spreadsheet = check_status(response).await?.json().await?;

        spreadsheet
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties)
            .min_by_key(|properties| properties.index)
            .map(|properties| properties.title)
            .ok_or(UpstreamError::NoSheets)
    }

    /// Column names from the first row of the sheet.
    async fn header_row(&self, token: &str, title: &str) -> Result<Vec<String>, UpstreamError> {
        let url = self.spreadsheet_url(Some(&format!("{}!1:1", quote_title(title))))?;

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let range: ValueRange = check_status(response).await?.json().await?;

        let headers: Vec<String> = range
            .values
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|cell| match cell {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();

        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(UpstreamError::MissingHeaderRow(title.to_string()));
        }

        Ok(headers)
    }
}

#[async_trait]
impl Ledger for GoogleSheetsLedger {
    async fn append_row(&self, row: &LedgerRow) -> Result<(), UpstreamError> {
        let token = fetch_access_token(&self.http, &self.token_url, &self.account).await?;

        let title = self.first_sheet_title(&token).await?;
        let headers = self.header_row(&token, &title).await?;

        let mut url = self.spreadsheet_url(Some(&format!("{}!A1:append", quote_title(&title))))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .json(&json!({ "values": [row.cells_for(&headers)] }))
            .send()
            .await?;
        check_status(response).await?;

        tracing::info!(sheet = %title, "Appended transaction row");
        Ok(())
    }
}

/// Quote a sheet title for A1 notation (`'It''s'`).
fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(api_url: &str) -> GoogleSheetsLedger {
        GoogleSheetsLedger::new(
            SheetsConfig {
                sheet_id: "sheet-123".to_string(),
                client_email: "relay@project.iam.gserviceaccount.com".to_string(),
                private_key: String::new(),
                token_url: "https://oauth2.googleapis.com/token".to_string(),
                api_url: api_url.to_string(),
            },
            reqwest::Client::new(),
        )
        .unwrap()
    }

    #[test]
    fn titles_are_quoted_for_a1_notation() {
        assert_eq!(quote_title("Sheet1"), "'Sheet1'");
        assert_eq!(quote_title("Top-up log"), "'Top-up log'");
        assert_eq!(quote_title("It's"), "'It''s'");
    }

    #[test]
    fn spreadsheet_urls_are_built_under_the_api_base() {
        let ledger = ledger("https://sheets.googleapis.com/");

        assert_eq!(
            ledger.spreadsheet_url(None).unwrap().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123"
        );
        assert_eq!(
            ledger.spreadsheet_url(Some("'Top-up log'!1:1")).unwrap().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/'Top-up%20log'!1:1"
        );
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let result = GoogleSheetsLedger::new(
            SheetsConfig {
                sheet_id: "sheet-123".to_string(),
                client_email: String::new(),
                private_key: String::new(),
                token_url: String::new(),
                api_url: "not a url".to_string(),
            },
            reqwest::Client::new(),
        );

        assert!(matches!(result, Err(UpstreamError::Url(_))));
    }
}
