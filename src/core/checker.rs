use crate::core::message::{format_failed_block, format_item_block, SlackMessage};
use crate::domain::model::{RunSummary, TrackedItem};
use crate::domain::ports::{AvailabilitySource, Notifier, PriceSource};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Only notify when at least one item is purchasable or preorderable.
    pub alert_only: bool,
    /// Report a failing item in the message instead of aborting the run.
    pub keep_going: bool,
}

/// Runs one check pass over the tracked items and sends the summary.
pub struct StockChecker<C, N>
where
    C: AvailabilitySource + PriceSource,
    N: Notifier,
{
    catalog: C,
    notifier: N,
    options: RunOptions,
}

impl<C, N> StockChecker<C, N>
where
    C: AvailabilitySource + PriceSource,
    N: Notifier,
{
    pub fn new(catalog: C, notifier: N, options: RunOptions) -> Self {
        Self {
            catalog,
            notifier,
            options,
        }
    }

    #[cfg(test)]
    pub(crate) fn notifier(&self) -> &N {
        &self.notifier
    }

    pub async fn run(&self, postal_code: &str, items: &[TrackedItem]) -> Result<RunSummary> {
        tracing::info!(
            "Checking {} item(s) for postal code {}",
            items.len(),
            postal_code
        );

        let (message, mut summary) = self.check_items(postal_code, items).await?;

        if self.options.alert_only && !summary.has_actionable() {
            tracing::info!("Alert mode: nothing purchasable or preorderable, notification skipped");
            return Ok(summary);
        }

        self.notifier.notify(&message).await?;
        summary.notified = true;

        Ok(summary)
    }

    /// Looks up every item in order and builds the message without sending it.
    pub async fn check_items(
        &self,
        postal_code: &str,
        items: &[TrackedItem],
    ) -> Result<(SlackMessage, RunSummary)> {
        let mut message = SlackMessage::new();
        let mut summary = RunSummary::default();

        for item in items {
            let text = match self.check_item(item, postal_code).await {
                Ok((text, actionable)) => {
                    if actionable {
                        summary.actionable += 1;
                    }
                    text
                }
                Err(e) if self.options.keep_going => {
                    tracing::warn!("Skipping {} ({}): {}", item.key, item.sku, e);
                    summary.failed += 1;
                    format_failed_block(&item.desc, &e.to_string())
                }
                Err(e) => return Err(e),
            };

            println!("{}", text);
            message.push_section(text);
            summary.items_checked += 1;
        }

        tracing::debug!(
            "Checked {} item(s): {} actionable, {} failed",
            summary.items_checked,
            summary.actionable,
            summary.failed
        );

        Ok((message, summary))
    }

    async fn check_item(&self, item: &TrackedItem, postal_code: &str) -> Result<(String, bool)> {
        let availability = self.catalog.availability(&item.sku, postal_code).await?;
        let price = self.catalog.price(&item.sku).await?;

        let actionable = availability.purchasable || price.is_preorderable;
        Ok((
            format_item_block(&item.desc, &availability, &price),
            actionable,
        ))
    }
}
