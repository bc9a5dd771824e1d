use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default cron expression: daily at 06:30 UTC, i.e. 12:00 PM IST.
pub const DEFAULT_SCHEDULE: &str = "0 30 6 * * *";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let spreadsheet_id = require("RETAILWATCH_SPREADSHEET_ID")?;
    let worksheet = or_default("RETAILWATCH_WORKSHEET", "Sheet1");
    let catalog_path = PathBuf::from(or_default(
        "RETAILWATCH_CATALOG_PATH",
        "./config/catalog.yaml",
    ));

    let credentials_path = lookup("GOOGLE_APPLICATION_CREDENTIALS")
        .ok()
        .map(PathBuf::from);
    let credentials_json = lookup("GOOGLE_SERVICE_ACCOUNT_JSON").ok();

    let log_level = or_default("RETAILWATCH_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("RETAILWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = lookup("RETAILWATCH_USER_AGENT").ok();
    let inter_request_delay_ms = parse_u64("RETAILWATCH_INTER_REQUEST_DELAY_MS", "2500")?;
    let delay_jitter_ms = parse_u64("RETAILWATCH_DELAY_JITTER_MS", "2000")?;
    let max_retries = parse_u32("RETAILWATCH_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("RETAILWATCH_RETRY_BACKOFF_BASE_SECS", "1")?;

    let schedule = or_default("RETAILWATCH_SCHEDULE", DEFAULT_SCHEDULE);

    Ok(AppConfig {
        spreadsheet_id,
        worksheet,
        catalog_path,
        credentials_path,
        credentials_json,
        log_level,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        delay_jitter_ms,
        max_retries,
        retry_backoff_base_secs,
        schedule,
    })
}
