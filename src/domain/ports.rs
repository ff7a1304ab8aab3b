use crate::core::message::SlackMessage;
use crate::domain::model::{Availability, Price};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    async fn availability(&self, sku: &str, postal_code: &str) -> Result<Availability>;
}

#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn price(&self, sku: &str) -> Result<Price>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &SlackMessage) -> Result<()>;
}
