//! Client for the Google Sheets v4 REST API.
//!
//! Covers exactly what a run needs: ensure the target worksheet exists,
//! bootstrap the header row on a fresh worksheet, and append the batch as
//! one `values:append` call. The base URL is injectable so tests can point
//! the client at a mock server.

use std::time::Duration;

use reqwest::{Client, Url};

use retailwatch_core::{ProductRecord, HEADER};

use crate::auth::{fetch_access_token, ServiceAccountKey};
use crate::error::SheetsError;
use crate::types::{AppendResponse, SpreadsheetMeta, ValueRange};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Authenticated Sheets API session for one spreadsheet.
///
/// Authentication happens once in [`SheetsClient::connect`]; the access
/// token lives comfortably longer than a run.
#[derive(Debug)]
pub struct SheetsClient {
    client: Client,
    base_url: Url,
    access_token: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    /// Authenticates against the production Sheets API.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] if the HTTP client cannot be built or
    /// authentication fails.
    pub async fn connect(
        key: &ServiceAccountKey,
        spreadsheet_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, SheetsError> {
        Self::connect_with_base_url(key, spreadsheet_id, timeout_secs, DEFAULT_BASE_URL).await
    }

    /// Authenticates with a custom API base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// See [`SheetsClient::connect`]; additionally fails with
    /// [`SheetsError::Api`] if `base_url` is not a valid URL base.
    pub async fn connect_with_base_url(
        key: &ServiceAccountKey,
        spreadsheet_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("retailwatch/0.1 (price-tracking)")
            .build()?;

        // Normalise: exactly one trailing slash so Url::join keeps the path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::Api {
            status: 0,
            context: format!("invalid base URL '{normalised}': {e}"),
        })?;

        let access_token = fetch_access_token(&client, key).await?;

        Ok(Self {
            client,
            base_url,
            access_token,
            spreadsheet_id: spreadsheet_id.to_owned(),
        })
    }

    /// Appends a full run batch to `worksheet`, creating the worksheet and
    /// its header row if needed. Returns the number of data rows appended.
    ///
    /// The batch is written in order as a single logical append; on any
    /// error nothing is retried here — the next scheduled run is the retry.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] on any API failure (auth expiry, quota,
    /// permission, malformed response).
    pub async fn append_run(
        &self,
        worksheet: &str,
        batch: &[ProductRecord],
    ) -> Result<u32, SheetsError> {
        self.ensure_worksheet(worksheet).await?;

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(batch.len() + 1);
        if self.worksheet_is_empty(worksheet).await? {
            tracing::info!(worksheet, "worksheet is empty — writing header row");
            rows.push(HEADER.iter().map(|h| (*h).to_string()).collect());
        }
        rows.extend(batch.iter().map(ProductRecord::to_row));

        self.append_rows(worksheet, &rows).await?;
        Ok(u32::try_from(batch.len()).unwrap_or(u32::MAX))
    }

    /// Creates `worksheet` if the spreadsheet does not already have a tab
    /// with that title.
    async fn ensure_worksheet(&self, worksheet: &str) -> Result<(), SheetsError> {
        let path = format!("v4/spreadsheets/{}", self.spreadsheet_id);
        let meta: SpreadsheetMeta = self
            .get_json(&path, &[("fields", "sheets.properties")])
            .await?;

        if meta
            .sheets
            .iter()
            .any(|s| s.properties.title == worksheet)
        {
            return Ok(());
        }

        tracing::info!(worksheet, "worksheet not found — creating it");
        let body = serde_json::json!({
            "requests": [{ "addSheet": { "properties": { "title": worksheet } } }]
        });
        let path = format!("v4/spreadsheets/{}:batchUpdate", self.spreadsheet_id);
        self.post_json::<serde_json::Value>(&path, &body).await?;
        Ok(())
    }

    /// A worksheet is empty when its first cell has no value — the same
    /// check decides whether the header row still needs to be written.
    async fn worksheet_is_empty(&self, worksheet: &str) -> Result<bool, SheetsError> {
        let path = format!(
            "v4/spreadsheets/{}/values/{worksheet}!A1:A1",
            self.spreadsheet_id
        );
        let range: ValueRange = self.get_json(&path, &[]).await?;
        Ok(range.values.is_empty())
    }

    async fn append_rows(&self, worksheet: &str, rows: &[Vec<String>]) -> Result<(), SheetsError> {
        let path = format!(
            "v4/spreadsheets/{}/values/{worksheet}!A1:append",
            self.spreadsheet_id
        );
        let body = serde_json::json!({ "values": rows });

        let url = self.build_url(
            &path,
            &[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ],
        )?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        let appended: AppendResponse = Self::read_json(response, &path).await?;

        let updated_rows = appended.updates.map_or(0, |u| u.updated_rows);
        tracing::debug!(worksheet, updated_rows, "append accepted");
        Ok(())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SheetsError> {
        let url = self.build_url(path, query)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        Self::read_json(response, path).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, SheetsError> {
        let url = self.build_url(path, &[])?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        Self::read_json(response, path).await
    }

    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, SheetsError> {
        let mut url = self.base_url.join(path).map_err(|e| SheetsError::Api {
            status: 0,
            context: format!("cannot build URL for {path}: {e}"),
        })?;
        for (k, v) in query {
            url.query_pairs_mut().append_pair(k, v);
        }
        Ok(url)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        context: &str,
    ) -> Result<T, SheetsError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SheetsError::Api {
                status: status.as_u16(),
                context: format!("{context}: {body}"),
            });
        }
        serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}
