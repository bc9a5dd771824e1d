//! Per-retailer field extraction rules.
//!
//! Each retailer gets one [`RetailerRules`] implementation with independent
//! best-effort selectors per field; a missing selector loses that field
//! only, never the record. Adding a retailer means adding one module and
//! registering it in [`REGISTRY`].

mod amazon;
mod ebay;
mod etsy;
mod helpers;
mod walmart;

use retailwatch_core::ExtractedFields;
use scraper::Html;

use crate::client::PageClient;
use crate::error::ScraperError;

/// Site-specific extraction rules for one retailer.
///
/// Field methods are pure functions of the parsed document: no state is
/// carried between calls, so extracting the same body twice yields the
/// same fields.
pub trait RetailerRules: Sync {
    /// Retailer identifier matching catalog entries, e.g. `"amazon"`.
    fn id(&self) -> &'static str;

    /// Raw-body check for bot-check / access-denied interstitials that come
    /// back with a 2xx status.
    fn blocked(&self, _body: &str) -> bool {
        false
    }

    fn name(&self, doc: &Html) -> Option<String>;
    fn brand(&self, doc: &Html) -> Option<String>;
    fn price(&self, doc: &Html) -> Option<String>;
    fn availability(&self, doc: &Html) -> Option<String>;
}

/// All supported retailers, keyed by [`RetailerRules::id`].
const REGISTRY: &[&dyn RetailerRules] = &[
    &amazon::Amazon,
    &ebay::Ebay,
    &etsy::Etsy,
    &walmart::Walmart,
];

/// Look up the extraction rules for a retailer identifier.
#[must_use]
pub fn rules_for(retailer: &str) -> Option<&'static dyn RetailerRules> {
    REGISTRY.iter().find(|r| r.id() == retailer).copied()
}

/// Extracts product fields from a page body using the given rules.
///
/// Never fails: each field is independently best-effort, and an empty body
/// yields all-`None` fields (the caller substitutes placeholders).
#[must_use]
pub fn extract_fields(rules: &dyn RetailerRules, body: &str) -> ExtractedFields {
    if body.trim().is_empty() {
        return ExtractedFields::default();
    }

    let doc = Html::parse_document(body);
    ExtractedFields {
        name: rules.name(&doc),
        brand: rules.brand(&doc),
        price: rules.price(&doc),
        availability: rules.availability(&doc),
    }
}

/// Fetches a product page and rejects bot-check interstitials.
///
/// # Errors
///
/// Propagates fetch errors from [`PageClient::fetch_page`], and returns
/// [`ScraperError::Blocked`] when the 2xx body is a denial page rather
/// than a product page.
pub async fn fetch_product_page(
    client: &PageClient,
    rules: &dyn RetailerRules,
    url: &str,
) -> Result<String, ScraperError> {
    let body = client.fetch_page(url).await?;
    if rules.blocked(&body) {
        return Err(ScraperError::Blocked {
            url: url.to_owned(),
        });
    }
    Ok(body)
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
