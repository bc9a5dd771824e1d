pub mod auth;
pub mod client;
pub mod error;
mod types;

pub use auth::{load_service_account_key, ServiceAccountKey};
pub use client::SheetsClient;
pub use error::SheetsError;
