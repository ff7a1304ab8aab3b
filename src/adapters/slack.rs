use crate::core::message::SlackMessage;
use crate::domain::ports::Notifier;
use crate::utils::error::{Result, StockError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// Posts payloads to a Slack incoming webhook.
pub struct SlackNotifier {
    client: Client,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, message: &SlackMessage) -> Result<()> {
        let payload = serde_json::to_string(message).map_err(|e| StockError::Notify {
            status: None,
            body: format!("cannot serialize payload: {}", e),
        })?;

        tracing::debug!(
            "Posting {} blocks ({} bytes) to webhook",
            message.blocks.len(),
            payload.len()
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| StockError::Notify {
                status: None,
                body: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            return Err(StockError::Notify {
                status: Some(status.as_u16()),
                body,
            });
        }

        tracing::info!("Slack notification sent");
        Ok(())
    }
}

fn error_body<E: std::fmt::Display>(read: std::result::Result<String, E>) -> String {
    match read {
        Ok(body) => body,
        Err(e) => format!("<unreadable body: {}>", e),
    }
}

/// Prints the payload instead of posting it (`--dry-run`).
pub struct DryRunNotifier;

#[async_trait]
impl Notifier for DryRunNotifier {
    async fn notify(&self, message: &SlackMessage) -> Result<()> {
        let payload = serde_json::to_string_pretty(message).map_err(|e| StockError::Notify {
            status: None,
            body: format!("cannot serialize payload: {}", e),
        })?;

        tracing::info!("Dry run, webhook not called");
        println!("{}", payload);
        Ok(())
    }
}
