use thiserror::Error;

/// Errors from the Google Sheets client. All of these are fatal to a run:
/// the whole batch is one logical append with no partial retry.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No usable service-account credentials, or the key JSON is malformed.
    #[error("credential error: {reason}")]
    Credentials { reason: String },

    /// JWT assertion could not be signed (bad private key material).
    #[error("JWT signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The OAuth token endpoint rejected the assertion.
    #[error("authentication failed: {reason}")]
    Auth { reason: String },

    /// The Sheets API returned a non-2xx status (quota, permission, bad range).
    #[error("Sheets API error {status} for {context}")]
    Api { status: u16, context: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
