//! Extraction rules for etsy.com listing pages.

use scraper::Html;

use super::helpers::{find_text, select_text};
use super::RetailerRules;
use crate::price::clean_price;

/// Etsy has no manufacturer brand; the shop name fills the brand column.
pub(super) struct Etsy;

impl RetailerRules for Etsy {
    fn id(&self) -> &'static str {
        "etsy"
    }

    fn blocked(&self, body: &str) -> bool {
        body.to_lowercase().contains("captcha")
    }

    fn name(&self, doc: &Html) -> Option<String> {
        select_text(doc, "h1.wt-text-body-03")
    }

    fn brand(&self, doc: &Html) -> Option<String> {
        select_text(doc, "a.wt-text-link-no-underline span")
    }

    fn price(&self, doc: &Html) -> Option<String> {
        select_text(doc, r#"p[class*="wt-text-title-03"]"#).and_then(|t| clean_price(&t))
    }

    fn availability(&self, doc: &Html) -> Option<String> {
        find_text(doc, r"(?i)in stock|Only \d+ left").or_else(|| Some("In Stock".to_string()))
    }
}
