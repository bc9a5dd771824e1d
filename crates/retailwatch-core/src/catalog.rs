use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One catalog entry: a retailer identifier and the ordered product URLs
/// tracked on that site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Short lowercase identifier, e.g. `"amazon"`. Selects the extraction
    /// rules applied to pages fetched from this entry's URLs.
    pub retailer: String,
    pub urls: Vec<String>,
}

/// The product catalog: an ordered list of retailer entries. Static for the
/// lifetime of a run; edited only by redeploying `config/catalog.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub retailers: Vec<CatalogEntry>,
}

impl Catalog {
    /// Total number of tracked URLs across all retailers. Equals the number
    /// of rows one run appends to the sheet.
    #[must_use]
    pub fn url_count(&self) -> usize {
        self.retailers.iter().map(|e| e.urls.len()).sum()
    }

    /// Iterate `(retailer, url)` pairs in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.retailers.iter().flat_map(|e| {
            e.urls
                .iter()
                .map(move |u| (e.retailer.as_str(), u.as_str()))
        })
    }
}

/// Load and validate the product catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: Catalog = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &catalog.retailers {
        let retailer = entry.retailer.trim();
        if retailer.is_empty() {
            return Err(ConfigError::Validation(
                "retailer identifier must be non-empty".to_string(),
            ));
        }

        if retailer != entry.retailer || retailer.chars().any(char::is_uppercase) {
            return Err(ConfigError::Validation(format!(
                "retailer identifier '{}' must be lowercase with no surrounding whitespace",
                entry.retailer
            )));
        }

        if !seen.insert(retailer.to_string()) {
            return Err(ConfigError::Validation(format!(
                "duplicate retailer entry: '{retailer}'"
            )));
        }

        if entry.urls.is_empty() {
            return Err(ConfigError::Validation(format!(
                "retailer '{retailer}' has no URLs"
            )));
        }

        for url in &entry.urls {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "retailer '{retailer}' has a non-http(s) URL: '{url}'"
                )));
            }
        }
    }

    Ok(())
}
