//! Extraction rules for amazon.com product pages.

use scraper::Html;

use super::helpers::{select_text, select_text_nth};
use super::RetailerRules;
use crate::price::clean_price;

/// Amazon interleaves the whole and fractional price parts in separate
/// spans; the two are concatenated before cleaning. Blocked requests come
/// back 200 with a robot-check page naming the bot-abuse contact address.
pub(super) struct Amazon;

impl RetailerRules for Amazon {
    fn id(&self) -> &'static str {
        "amazon"
    }

    fn blocked(&self, body: &str) -> bool {
        body.contains("api-services-support@amazon.com")
    }

    fn name(&self, doc: &Html) -> Option<String> {
        select_text(doc, "span#productTitle")
    }

    fn brand(&self, doc: &Html) -> Option<String> {
        // Product-overview brand row: label span, then value span.
        select_text_nth(doc, "tr.po-brand span", 1)
    }

    fn price(&self, doc: &Html) -> Option<String> {
        let whole = select_text(doc, "span.a-price-whole");
        let fraction = select_text(doc, "span.a-price-fraction");
        if let (Some(w), Some(f)) = (whole, fraction) {
            return clean_price(&format!("{w}{f}"));
        }

        // Deal and legacy price blocks.
        select_text(doc, "span#priceblock_dealprice")
            .or_else(|| select_text(doc, "span.a-price-current"))
            .and_then(|t| clean_price(&t))
    }

    fn availability(&self, doc: &Html) -> Option<String> {
        select_text(doc, "div#availability span")
    }
}
