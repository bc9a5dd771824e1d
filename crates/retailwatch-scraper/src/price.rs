//! Universal price-text cleaning.
//!
//! Retail pages wrap prices in sale labels, currency symbols, and locale
//! separators: `"Sale Price $15.99"`, `"$4.99 ($0.50/ounce)"`, `"1.234,56"`.
//! [`clean_price`] reduces all of these to a plain decimal string.

use regex::Regex;

/// Labels commonly prefixed or suffixed to price text on retail pages.
const PRICE_LABELS: [&str; 5] = ["Sale Price", "Current Price", "reg", "was", "now"];

/// Extracts the first price-like number from `raw` as a normalised decimal
/// string, e.g. `"Sale Price $1.234,56"` → `"1234.56"`.
///
/// Returns `None` when no parseable price is present.
#[must_use]
pub fn clean_price(raw: &str) -> Option<String> {
    let mut text = raw.to_string();
    for label in PRICE_LABELS {
        text = text.replace(label, "");
    }

    // Optional currency symbol, then groups of digits with `,`/`.` used as
    // either thousands or decimal separators.
    let pattern = Regex::new(r"[$£€¥]?(\d{1,3}(?:[,.]\d{3})*(?:[,.]\d{2})?)").ok()?;
    let main_price = pattern.captures(&text)?.get(1)?.as_str().to_string();

    let normalised = normalise_separators(&main_price);

    // Reject anything that didn't reduce to a plain number.
    normalised.parse::<f64>().ok().map(|_| normalised)
}

/// Converts European-style separators (`1.234,56`) and thousands commas
/// (`1,234.56`) to a plain `1234.56` form.
fn normalise_separators(price: &str) -> String {
    let has_comma = price.contains(',');
    let has_dot = price.contains('.');

    if has_comma && has_dot {
        if price.rfind(',') > price.rfind('.') {
            // 1.234,56 — comma is the decimal separator.
            price.replace('.', "").replace(',', ".")
        } else {
            // 1,234.56 — comma is a thousands separator.
            price.replace(',', "")
        }
    } else if has_comma && price.split(',').next_back().is_some_and(|d| d.len() == 2) {
        // 123,45 — comma is the decimal separator.
        price.replace(',', ".")
    } else {
        price.replace(',', "")
    }
}
