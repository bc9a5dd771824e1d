use std::path::PathBuf;

/// Process-wide configuration, constructed once at startup and passed down
/// to the run orchestrator. See [`crate::config::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub catalog_path: PathBuf,
    /// Path to a service-account key file (`GOOGLE_APPLICATION_CREDENTIALS`).
    pub credentials_path: Option<PathBuf>,
    /// Inline service-account key JSON (`GOOGLE_SERVICE_ACCOUNT_JSON`),
    /// used on cloud deployments where no key file is baked into the image.
    pub credentials_json: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Fixed User-Agent override. When `None` the fetcher rotates through
    /// its built-in browser pool.
    pub user_agent: Option<String>,
    pub inter_request_delay_ms: u64,
    pub delay_jitter_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Six-field cron expression used by `retailwatch schedule`.
    pub schedule: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("worksheet", &self.worksheet)
            .field("catalog_path", &self.catalog_path)
            .field("credentials_path", &self.credentials_path)
            .field(
                "credentials_json",
                &self.credentials_json.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("delay_jitter_ms", &self.delay_jitter_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("schedule", &self.schedule)
            .finish()
    }
}
