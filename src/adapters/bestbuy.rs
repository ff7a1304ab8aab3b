use crate::config::file_config::StockConfig;
use crate::domain::model::{Availability, Price};
use crate::domain::ports::{AvailabilitySource, PriceSource};
use crate::utils::error::{Result, StockError};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const BODY_SNIPPET_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    availabilities: Vec<AvailabilityRecord>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityRecord {
    shipping: ShippingRecord,
    pickup: PickupRecord,
}

#[derive(Debug, Deserialize)]
struct ShippingRecord {
    purchasable: bool,
    status: String,
}

#[derive(Debug, Deserialize)]
struct PickupRecord {
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfferRecord {
    sale_price: f64,
    is_preorderable: bool,
}

/// Client for the public bestbuy.ca availability and offers endpoints.
pub struct BestBuyClient {
    client: Client,
    availability_url: String,
    offers_url: String,
    user_agent: String,
}

impl BestBuyClient {
    pub fn new(
        client: Client,
        availability_url: impl Into<String>,
        offers_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            client,
            availability_url: availability_url.into(),
            offers_url: offers_url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(client: Client, config: &StockConfig) -> Self {
        Self::new(
            client,
            config.best_buy.availability_url.clone(),
            config.best_buy.offers_url.clone(),
            config.best_buy.user_agent.clone(),
        )
    }

    fn offers_endpoint(&self, sku: &str) -> String {
        format!("{}/{}/offers", self.offers_url.trim_end_matches('/'), sku)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        sku: &str,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        tracing::debug!("Requesting {} for SKU {}", endpoint, sku);

        let response = request
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| lookup_error(sku, endpoint, None, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| lookup_error(sku, endpoint, Some(status.as_u16()), e.to_string()))?;

        tracing::debug!("Response status {} ({} bytes)", status, body.len());

        if !status.is_success() {
            tracing::warn!("Unexpected status {} for SKU {}: {}", status, sku, body);
            return Err(lookup_error(
                sku,
                endpoint,
                Some(status.as_u16()),
                format!("unexpected status, body: {}", snippet(&body)),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            lookup_error(
                sku,
                endpoint,
                Some(status.as_u16()),
                format!("unexpected response shape: {}", e),
            )
        })
    }
}

#[async_trait]
impl AvailabilitySource for BestBuyClient {
    async fn availability(&self, sku: &str, postal_code: &str) -> Result<Availability> {
        let request = self
            .client
            .get(&self.availability_url)
            .query(&[("postalCode", postal_code), ("skus", sku)]);

        let response: AvailabilityResponse = self
            .fetch_json(sku, &self.availability_url, request)
            .await?;

        let record = response.availabilities.into_iter().next().ok_or_else(|| {
            lookup_error(
                sku,
                &self.availability_url,
                None,
                "response contained no availability records".to_string(),
            )
        })?;

        Ok(Availability {
            purchasable: record.shipping.purchasable,
            shipping_status: record.shipping.status,
            pickup_status: record.pickup.status,
        })
    }
}

#[async_trait]
impl PriceSource for BestBuyClient {
    async fn price(&self, sku: &str) -> Result<Price> {
        let endpoint = self.offers_endpoint(sku);
        let request = self.client.get(&endpoint);

        let offers: Vec<OfferRecord> = self.fetch_json(sku, &endpoint, request).await?;

        let offer = offers.into_iter().next().ok_or_else(|| {
            lookup_error(
                sku,
                &endpoint,
                None,
                "response contained no offers".to_string(),
            )
        })?;

        Ok(Price {
            display_price: format_price(offer.sale_price),
            is_preorderable: offer.is_preorderable,
        })
    }
}

pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn lookup_error(sku: &str, endpoint: &str, status: Option<u16>, message: String) -> StockError {
    StockError::Lookup {
        sku: sku.to_string(),
        endpoint: endpoint.to_string(),
        status,
        message,
    }
}

fn snippet(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::build_http_client;
    use httpmock::prelude::*;
    use std::time::{Duration, Instant};

    fn client_for(server: &MockServer) -> BestBuyClient {
        BestBuyClient::new(
            Client::new(),
            server.url("/ecomm-api/availability/products"),
            server.url("/api/offers/v1/products"),
            "test-agent/1.0",
        )
    }

    #[tokio::test]
    async fn test_availability_parses_first_record() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ecomm-api/availability/products")
                .query_param("postalCode", "H2X1Y4")
                .query_param("skus", "14962185")
                .header("user-agent", "test-agent/1.0");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "availabilities": [
                        {
                            "sku": "14962185",
                            "shipping": {"purchasable": true, "status": "InStock"},
                            "pickup": {"purchasable": false, "status": "NotAvailable"}
                        },
                        {
                            "sku": "other",
                            "shipping": {"purchasable": false, "status": "SoldOut"},
                            "pickup": {"purchasable": false, "status": "SoldOut"}
                        }
                    ]
                }));
        });

        let client = client_for(&server);
        let availability = client.availability("14962185", "H2X1Y4").await.unwrap();

        api_mock.assert();
        assert_eq!(
            availability,
            Availability {
                purchasable: true,
                shipping_status: "InStock".to_string(),
                pickup_status: "NotAvailable".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_availability_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ecomm-api/availability/products");
            then.status(403).body("Access Denied");
        });

        let client = client_for(&server);
        let err = client.availability("14962185", "H2X1Y4").await.unwrap_err();

        match err {
            StockError::Lookup {
                sku,
                status,
                message,
                ..
            } => {
                assert_eq!(sku, "14962185");
                assert_eq!(status, Some(403));
                assert!(message.contains("Access Denied"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_availability_missing_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ecomm-api/availability/products");
            then.status(200)
                .json_body(serde_json::json!({"availabilities": [{"sku": "1"}]}));
        });

        let client = client_for(&server);
        let err = client.availability("1", "H2X1Y4").await.unwrap_err();
        assert!(err.to_string().contains("unexpected response shape"));
    }

    #[tokio::test]
    async fn test_availability_empty_records() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ecomm-api/availability/products");
            then.status(200)
                .json_body(serde_json::json!({"availabilities": []}));
        });

        let client = client_for(&server);
        let err = client.availability("1", "H2X1Y4").await.unwrap_err();
        assert!(err.to_string().contains("no availability records"));
    }

    #[tokio::test]
    async fn test_price_parses_first_offer() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/offers/v1/products/14962185/offers")
                .header("user-agent", "test-agent/1.0");
            then.status(200).json_body(serde_json::json!([
                {"salePrice": 629.99, "isPreorderable": false, "regularPrice": 629.99},
                {"salePrice": 1.0, "isPreorderable": true}
            ]));
        });

        let client = client_for(&server);
        let price = client.price("14962185").await.unwrap();

        api_mock.assert();
        assert_eq!(price.display_price, "$629.99");
        assert!(!price.is_preorderable);
    }

    #[tokio::test]
    async fn test_price_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/offers/v1/products/42/offers");
            then.status(200).body("<html>maintenance</html>");
        });

        let client = client_for(&server);
        let err = client.price("42").await.unwrap_err();
        assert!(matches!(err, StockError::Lookup { status: Some(200), .. }));
    }

    #[tokio::test]
    async fn test_slow_endpoint_hits_request_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ecomm-api/availability/products");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(serde_json::json!({"availabilities": []}));
        });

        let client = BestBuyClient::new(
            build_http_client(Duration::from_secs(1)).unwrap(),
            server.url("/ecomm-api/availability/products"),
            server.url("/api/offers/v1/products"),
            "test-agent/1.0",
        );

        let started = Instant::now();
        let err = client.availability("1", "H2X1Y4").await.unwrap_err();

        assert!(started.elapsed() < Duration::from_millis(2500));
        assert!(matches!(err, StockError::Lookup { status: None, .. }));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(599.0), "$599.00");
        assert_eq!(format_price(1299.99), "$1299.99");
    }

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(BODY_SNIPPET_CHARS + 10);
        let short = snippet(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.len(), BODY_SNIPPET_CHARS + 3);
        assert_eq!(snippet("short"), "short");
    }
}
