//! HTTP client for fetching retailer product pages.

use std::time::Duration;

use rand::seq::IndexedRandom;
use reqwest::Client;

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;

/// Browser User-Agents rotated across requests. Retail sites serve reduced
/// or blocked pages to obvious non-browser agents.
const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.2 Safari/605.1.15",
];

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// HTTP client for product pages: browser-like header set, bounded timeout,
/// single attempt per URL by default (retries are opt-in via config).
pub struct PageClient {
    client: Client,
    /// Fixed User-Agent; when `None`, one of [`USER_AGENTS`] is drawn per request.
    user_agent_override: Option<String>,
    /// Additional attempts after the first failure for retriable errors.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl PageClient {
    /// Creates a `PageClient` with configured timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: Option<&str>,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            user_agent_override: user_agent.map(str::to_owned),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches a product page and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status (429/5xx
    ///   retried when retries are enabled, other 4xx not).
    /// - [`ScraperError::Http`] — network failure or timeout after all
    ///   retries are exhausted.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async {
            let response = self
                .client
                .get(url)
                .header(reqwest::header::USER_AGENT, self.pick_user_agent())
                .header(reqwest::header::ACCEPT, ACCEPT)
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }

    fn pick_user_agent(&self) -> &str {
        self.user_agent_override.as_deref().unwrap_or_else(|| {
            USER_AGENTS
                .choose(&mut rand::rng())
                .copied()
                .unwrap_or(USER_AGENTS[0])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_user_agent_honours_override() {
        let client = PageClient::new(5, Some("retailwatch-test/0.1"), 0, 0).unwrap();
        assert_eq!(client.pick_user_agent(), "retailwatch-test/0.1");
    }

    #[test]
    fn pick_user_agent_rotates_within_pool() {
        let client = PageClient::new(5, None, 0, 0).unwrap();
        for _ in 0..20 {
            let ua = client.pick_user_agent();
            assert!(USER_AGENTS.contains(&ua), "unexpected UA: {ua}");
        }
    }
}
