//! Response shapes for the Sheets v4 and OAuth token endpoints. Request
//! bodies are small enough to build inline with `serde_json::json!`.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// `GET /v4/spreadsheets/{id}?fields=sheets.properties`
#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<SheetInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetInfo {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetProperties {
    pub title: String,
}

/// `GET /v4/spreadsheets/{id}/values/{range}` — `values` is omitted
/// entirely when the range is empty.
#[derive(Debug, Deserialize)]
pub(crate) struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// `POST .../values/{range}:append`
#[derive(Debug, Deserialize)]
pub(crate) struct AppendResponse {
    #[serde(default)]
    pub updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppendUpdates {
    #[serde(rename = "updatedRows", default)]
    pub updated_rows: u32,
}
