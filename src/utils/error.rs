use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("Configuration error in {source_name}: {message}")]
    Config {
        source_name: String,
        message: String,
    },

    #[error("Lookup failed for SKU {sku} at {endpoint}{}: {message}", status_suffix(.status))]
    Lookup {
        sku: String,
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Webhook post failed{}: {body}", status_suffix(.status))]
    Notify { status: Option<u16>, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Upstream,
    Notification,
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl StockError {
    pub fn config(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Lookup { .. } => ErrorCategory::Upstream,
            Self::Notify { .. } => ErrorCategory::Notification,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Config { .. } => {
                "Check that the config file exists and defines postal_code, slack.webhook_url and best_buy.skus_list"
            }
            Self::Lookup {
                status: Some(403), ..
            } => "The retailer rejected the request; the user agent may need updating",
            Self::Lookup { .. } => {
                "Verify the SKU is still listed and the retailer API is reachable, then rerun"
            }
            Self::Notify { .. } => "Verify the Slack webhook URL is still active",
        }
    }

    /// Process exit code reported by the binary.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Upstream => 2,
            ErrorCategory::Notification => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, StockError>;
