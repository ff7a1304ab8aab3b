pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{bestbuy::BestBuyClient, slack::DryRunNotifier, slack::SlackNotifier};
pub use config::StockConfig;
pub use crate::core::checker::{RunOptions, StockChecker};
pub use crate::core::message::{expand_camel_case, SlackMessage};
pub use utils::error::{Result, StockError};
