// Adapters layer: concrete implementations for external systems (retailer API, Slack).

pub mod bestbuy;
pub mod slack;

use crate::utils::error::{Result, StockError};
use reqwest::Client;
use std::time::Duration;

/// Shared HTTP client. Every request is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| StockError::config("http", format!("cannot build HTTP client: {}", e)))
}
