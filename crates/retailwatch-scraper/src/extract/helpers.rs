//! Shared selector helpers for the retailer rule modules.
//!
//! All helpers are best-effort: an unparseable selector or a missing node
//! yields `None`, matching the per-field degradation contract.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Trimmed text content of the first element matching `selector`.
pub(super) fn select_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let el = doc.select(&sel).next()?;
    non_empty(element_text(el))
}

/// Trimmed text content of the `n`-th (0-based) element matching `selector`.
pub(super) fn select_text_nth(doc: &Html, selector: &str, n: usize) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let el = doc.select(&sel).nth(n)?;
    non_empty(element_text(el))
}

/// First trimmed text node in the document matching `pattern`.
pub(super) fn find_text(doc: &Html, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    doc.root_element()
        .text()
        .map(str::trim)
        .find(|t| re.is_match(t))
        .map(str::to_string)
        .and_then(non_empty)
}

/// Value cell of a labelled spec-table row: scans elements matching
/// `row_selector`, and for the first row whose `label_selector` text
/// contains `label`, returns its `value_selector` text.
pub(super) fn labeled_value(
    doc: &Html,
    row_selector: &str,
    label_selector: &str,
    value_selector: &str,
    label: &str,
) -> Option<String> {
    let row_sel = Selector::parse(row_selector).ok()?;
    let label_sel = Selector::parse(label_selector).ok()?;
    let value_sel = Selector::parse(value_selector).ok()?;

    for row in doc.select(&row_sel) {
        let has_label = row
            .select(&label_sel)
            .any(|l| element_text(l).contains(label));
        if has_label {
            let value = row.select(&value_sel).next()?;
            return non_empty(element_text(value));
        }
    }
    None
}

pub(super) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub(super) fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
