use crate::core::checker::RunOptions;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "stock_check.yml";

#[derive(Debug, Clone, Parser)]
#[command(name = "bby-stock")]
#[command(about = "Checks Best Buy Canada stock for a list of SKUs and posts a summary to Slack")]
pub struct CliArgs {
    /// Path to config file (defaults to stock_check.yml next to the executable)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Alert mode; send the notification only if something is in stock or preorderable
    #[arg(short, long)]
    pub alert: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the Slack payload instead of posting it
    #[arg(long)]
    pub dry_run: bool,

    /// Report a failing item in the message instead of aborting the run
    #[arg(long)]
    pub keep_going: bool,
}

impl CliArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            alert_only: self.alert,
            keep_going: self.keep_going,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
