//! Shared record types for one scraping run.
//!
//! Every run appends one row per catalog URL, always seven columns wide.
//! Fields that could not be extracted carry [`PLACEHOLDER`] instead of being
//! omitted, so row width is constant across retailers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel written for any field that could not be extracted.
pub const PLACEHOLDER: &str = "N/A";

/// Fixed column order of the worksheet. [`ProductRecord::to_row`] emits
/// values in exactly this order.
pub const HEADER: [&str; 7] = [
    "timestamp",
    "website",
    "name",
    "brand",
    "price",
    "availability",
    "url",
];

/// Best-effort output of one extraction pass over a page body. `None` means
/// the field's selectors found nothing; the record constructor substitutes
/// [`PLACEHOLDER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub availability: Option<String>,
}

/// One fully-populated row. `website` and `url` are always real values;
/// everything else is an extracted value or [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub timestamp: DateTime<Utc>,
    pub website: String,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub availability: String,
    pub url: String,
}

/// The ordered sequence of records produced by one run, consumed once by
/// the sheet writer.
pub type RunBatch = Vec<ProductRecord>;

impl ProductRecord {
    /// Build a record from extracted fields, filling [`PLACEHOLDER`] for
    /// anything the extractor could not find.
    #[must_use]
    pub fn from_fields(
        timestamp: DateTime<Utc>,
        website: &str,
        url: &str,
        fields: ExtractedFields,
    ) -> Self {
        let or_placeholder = |v: Option<String>| {
            v.filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        };

        Self {
            timestamp,
            website: website.to_string(),
            name: or_placeholder(fields.name),
            brand: or_placeholder(fields.brand),
            price: or_placeholder(fields.price),
            availability: or_placeholder(fields.availability),
            url: url.to_string(),
        }
    }

    /// Build the record for a URL whose page could not be fetched or was
    /// blocked. All data fields are placeholders except `availability`,
    /// which carries the error marker (e.g. `"fetch failed"`).
    #[must_use]
    pub fn failed(timestamp: DateTime<Utc>, website: &str, url: &str, marker: &str) -> Self {
        Self {
            timestamp,
            website: website.to_string(),
            name: PLACEHOLDER.to_string(),
            brand: PLACEHOLDER.to_string(),
            price: PLACEHOLDER.to_string(),
            availability: marker.to_string(),
            url: url.to_string(),
        }
    }

    /// Render the record as a seven-column row in [`HEADER`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.website.clone(),
            self.name.clone(),
            self.brand.clone(),
            self.price.clone(),
            self.availability.clone(),
            self.url.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 6, 30, 0).unwrap()
    }

    #[test]
    fn from_fields_fills_placeholders() {
        let fields = ExtractedFields {
            name: Some("Widget".to_string()),
            brand: None,
            price: Some("9.99".to_string()),
            availability: None,
        };
        let record = ProductRecord::from_fields(at(), "amazon", "http://example/p1", fields);
        assert_eq!(record.name, "Widget");
        assert_eq!(record.brand, PLACEHOLDER);
        assert_eq!(record.price, "9.99");
        assert_eq!(record.availability, PLACEHOLDER);
        assert_eq!(record.website, "amazon");
        assert_eq!(record.url, "http://example/p1");
    }

    #[test]
    fn from_fields_treats_whitespace_as_missing() {
        let fields = ExtractedFields {
            name: Some("   ".to_string()),
            ..ExtractedFields::default()
        };
        let record = ProductRecord::from_fields(at(), "ebay", "https://e/1", fields);
        assert_eq!(record.name, PLACEHOLDER);
    }

    #[test]
    fn failed_record_carries_marker_in_availability() {
        let record = ProductRecord::failed(at(), "etsy", "https://etsy/1", "fetch failed");
        assert_eq!(record.availability, "fetch failed");
        assert_eq!(record.name, PLACEHOLDER);
        assert_eq!(record.brand, PLACEHOLDER);
        assert_eq!(record.price, PLACEHOLDER);
        assert_eq!(record.url, "https://etsy/1");
    }

    #[test]
    fn to_row_matches_header_width_and_order() {
        let record = ProductRecord::failed(at(), "amazon", "https://a/1", "blocked");
        let row = record.to_row();
        assert_eq!(row.len(), HEADER.len());
        assert_eq!(row[0], "2024-06-01 06:30:00");
        assert_eq!(row[1], "amazon");
        assert_eq!(row[5], "blocked");
        assert_eq!(row[6], "https://a/1");
    }
}
