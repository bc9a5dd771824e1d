//! The run orchestrator: one sequential fetch-extract pass over the
//! catalog, then a single batch write to the sheet.
//!
//! Per-URL failures are isolated — the batch always has exactly one record
//! per catalog URL, in catalog order, with placeholder fields and a marker
//! in the availability column for URLs that produced no product page.

use std::time::Duration;

use chrono::Utc;
use rand::Rng;

use retailwatch_core::{load_catalog, AppConfig, Catalog, ProductRecord, RunBatch};
use retailwatch_scraper::{extract_fields, fetch_product_page, rules_for, PageClient, ScraperError};
use retailwatch_sheets::{load_service_account_key, SheetsClient};

/// Availability markers for URLs that produced no product page.
const MARKER_FETCH_FAILED: &str = "fetch failed";
const MARKER_BLOCKED: &str = "blocked";
const MARKER_UNSUPPORTED: &str = "unsupported retailer";

/// Full run: load catalog, scrape, authenticate, append.
///
/// A scrape failure on any single URL never fails the run; only a catalog,
/// credential, or sheet-write problem propagates (and sets the exit code).
pub(crate) async fn run_and_write(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(&config.catalog_path)?;
    let client = PageClient::new(
        config.request_timeout_secs,
        config.user_agent.as_deref(),
        config.max_retries,
        config.retry_backoff_base_secs,
    )?;

    let batch = run_once(config, &catalog, &client).await;
    if batch.is_empty() {
        tracing::warn!("catalog has no URLs — nothing to write");
        return Ok(());
    }

    tracing::info!(rows = batch.len(), "scrape complete — writing batch");
    let key = load_service_account_key(
        config.credentials_path.as_deref(),
        config.credentials_json.as_deref(),
    )?;
    let sheets = SheetsClient::connect(&key, &config.spreadsheet_id, config.request_timeout_secs)
        .await?;
    let appended = sheets.append_run(&config.worksheet, &batch).await?;
    tracing::info!(appended, worksheet = %config.worksheet, "batch written");
    Ok(())
}

/// Produce one [`ProductRecord`] per catalog URL, in catalog order.
pub(crate) async fn run_once(
    config: &AppConfig,
    catalog: &Catalog,
    client: &PageClient,
) -> RunBatch {
    let mut batch: RunBatch = Vec::with_capacity(catalog.url_count());
    let mut first = true;

    for entry in &catalog.retailers {
        tracing::info!(
            retailer = %entry.retailer,
            urls = entry.urls.len(),
            "scraping retailer"
        );
        for url in &entry.urls {
            if !first {
                pace(config).await;
            }
            first = false;
            batch.push(scrape_one(client, &entry.retailer, url).await);
        }
    }

    batch
}

/// Fetch and extract a single URL; failures degrade to a marker record.
async fn scrape_one(client: &PageClient, retailer: &str, url: &str) -> ProductRecord {
    let now = Utc::now();

    let Some(rules) = rules_for(retailer) else {
        tracing::warn!(retailer, url, "no extraction rules registered for retailer");
        return ProductRecord::failed(now, retailer, url, MARKER_UNSUPPORTED);
    };

    match fetch_product_page(client, rules, url).await {
        Ok(body) => {
            let fields = extract_fields(rules, &body);
            ProductRecord::from_fields(now, retailer, url, fields)
        }
        Err(ScraperError::Blocked { .. }) => {
            tracing::warn!(retailer, url, "request blocked by retailer");
            ProductRecord::failed(now, retailer, url, MARKER_BLOCKED)
        }
        Err(e) => {
            tracing::warn!(retailer, url, error = %e, "failed to fetch product page");
            ProductRecord::failed(now, retailer, url, MARKER_FETCH_FAILED)
        }
    }
}

/// Jittered delay between consecutive fetches, to avoid hammering sites
/// with back-to-back requests at a fixed cadence.
async fn pace(config: &AppConfig) {
    let jitter = if config.delay_jitter_ms > 0 {
        rand::rng().random_range(0..=config.delay_jitter_ms)
    } else {
        0
    };
    let delay_ms = config.inter_request_delay_ms.saturating_add(jitter);
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
