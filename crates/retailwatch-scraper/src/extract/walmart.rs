//! Extraction rules for walmart.com product pages.

use scraper::{Html, Selector};

use super::helpers::select_text;
use super::RetailerRules;
use crate::price::clean_price;

pub(super) struct Walmart;

impl RetailerRules for Walmart {
    fn id(&self) -> &'static str {
        "walmart"
    }

    fn blocked(&self, body: &str) -> bool {
        body.contains("Access Denied") || body.to_lowercase().contains("captcha")
    }

    fn name(&self, doc: &Html) -> Option<String> {
        select_text(doc, r#"h1[itemprop="name"]"#)
            .or_else(|| select_text(doc, "h1.product-title-text"))
    }

    fn brand(&self, doc: &Html) -> Option<String> {
        select_text(doc, r#"a[link-identifier="brandName"]"#)
    }

    fn price(&self, doc: &Html) -> Option<String> {
        select_text(doc, r#"span[itemprop="price"]"#)
            .or_else(|| select_text(doc, "span.price-characteristic"))
            .and_then(|t| clean_price(&t))
    }

    fn availability(&self, doc: &Html) -> Option<String> {
        if has_match(doc, "div.out-of-stock-message") {
            return Some("Out of Stock".to_string());
        }
        if has_match(doc, "button.add-to-cart-button") {
            return Some("In Stock".to_string());
        }
        None
    }
}

fn has_match(doc: &Html, selector: &str) -> bool {
    Selector::parse(selector)
        .map(|sel| doc.select(&sel).next().is_some())
        .unwrap_or(false)
}
