//! Retry with exponential backoff for transient fetch errors.
//!
//! Non-retriable errors (4xx statuses other than 429, blocked pages) are
//! propagated immediately without retrying. The default configuration sets
//! `max_retries = 0`, so a run makes a single attempt per URL unless the
//! operator opts in.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` represents a transient condition worth retrying.
///
/// Retriable: network-level failures and 429/5xx statuses. A blocked page
/// or an ordinary 4xx would come back identical on retry.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        ScraperError::Blocked { .. } | ScraperError::UnsupportedRetailer { .. } => false,
    }
}

/// Executes `operation`, retrying transient errors with exponential backoff.
///
/// Sleeps `backoff_base_secs * 2^attempt` seconds between attempts, up to
/// `max_retries` additional attempts after the first. Non-retriable errors
/// and the final retriable error are returned to the caller.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        // Cap the shift to keep the multiply from overflowing on extreme configs.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient fetch error — retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
