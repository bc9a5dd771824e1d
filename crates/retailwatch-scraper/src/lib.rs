pub mod client;
pub mod error;
pub mod extract;
pub mod price;
mod retry;

pub use client::PageClient;
pub use error::ScraperError;
pub use extract::{extract_fields, fetch_product_page, rules_for, RetailerRules};
pub use price::clean_price;
