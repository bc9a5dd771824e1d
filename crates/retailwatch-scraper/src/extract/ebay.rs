//! Extraction rules for ebay.com item pages.

use scraper::Html;

use super::helpers::{find_text, labeled_value, select_text};
use super::RetailerRules;
use crate::price::clean_price;

pub(super) struct Ebay;

impl RetailerRules for Ebay {
    fn id(&self) -> &'static str {
        "ebay"
    }

    fn blocked(&self, body: &str) -> bool {
        body.contains("Access Denied") || body.to_lowercase().contains("captcha")
    }

    fn name(&self, doc: &Html) -> Option<String> {
        select_text(doc, "h1.x-item-title__mainTitle span.ux-textspans--BOLD").or_else(|| {
            // Legacy listing layout.
            select_text(doc, "h1#itemTitle")
                .map(|t| t.replace("Details about", "").trim().to_string())
        })
    }

    fn brand(&self, doc: &Html) -> Option<String> {
        labeled_value(
            doc,
            "dl.ux-labels-values",
            "dt.ux-labels-values__labels",
            "dd.ux-labels-values__values",
            "Brand",
        )
    }

    fn price(&self, doc: &Html) -> Option<String> {
        select_text(doc, "div.x-price-primary span.ux-textspans")
            .or_else(|| select_text(doc, "span#prcIsum"))
            .and_then(|t| clean_price(&t))
    }

    fn availability(&self, doc: &Html) -> Option<String> {
        // Quantity hints ("3 sold", "5 available", "Last One"); listings
        // without one are live listings, so default to in stock.
        find_text(doc, r"(?i)\d+ sold|\d+ available|Last One")
            .or_else(|| Some("In Stock".to_string()))
    }
}
