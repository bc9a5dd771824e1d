use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// Network or TLS failure from the underlying HTTP client, including
    /// request timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The page came back 2xx but is a bot-check or denial interstitial
    /// rather than a product page.
    #[error("request blocked by retailer for {url}")]
    Blocked { url: String },

    /// No extraction rules are registered for this retailer identifier.
    #[error("unsupported retailer: {retailer}")]
    UnsupportedRetailer { retailer: String },
}
