use crate::domain::model::TrackedItem;
use crate::utils::error::{Result, StockError};
use crate::utils::validation::{self, Validate};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_AVAILABILITY_URL: &str = "https://www.bestbuy.ca/ecomm-api/availability/products";
pub const DEFAULT_OFFERS_URL: &str = "https://www.bestbuy.ca/api/offers/v1/products";

// bestbuy.ca rejects generic automated clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/87.0.4280.88 Safari/537.36";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct StockConfig {
    pub postal_code: String,
    pub slack: SlackConfig,
    pub best_buy: BestBuyConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    pub webhook_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BestBuyConfig {
    /// Tracked items in document order.
    #[serde(default, deserialize_with = "deserialize_skus_list")]
    pub skus_list: Vec<TrackedItem>,
    #[serde(default = "default_availability_url")]
    pub availability_url: String,
    #[serde(default = "default_offers_url")]
    pub offers_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

fn default_availability_url() -> String {
    DEFAULT_AVAILABILITY_URL.to_string()
}

fn default_offers_url() -> String {
    DEFAULT_OFFERS_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

#[derive(Deserialize)]
struct RawItem {
    sku: SkuValue,
    desc: String,
}

// YAML authors often leave numeric SKUs unquoted
#[derive(Deserialize)]
#[serde(untagged)]
enum SkuValue {
    Text(String),
    Number(u64),
}

impl From<SkuValue> for String {
    fn from(value: SkuValue) -> Self {
        match value {
            SkuValue::Text(s) => s,
            SkuValue::Number(n) => n.to_string(),
        }
    }
}

/// Keeps `skus_list` entries in the order they appear in the file, which a
/// plain map type would lose.
fn deserialize_skus_list<'de, D>(deserializer: D) -> std::result::Result<Vec<TrackedItem>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SkusListVisitor;

    impl<'de> Visitor<'de> for SkusListVisitor {
        type Value = Vec<TrackedItem>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a mapping of names to {sku, desc} records")
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(self)
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut items = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, raw)) = map.next_entry::<String, RawItem>()? {
                items.push(TrackedItem {
                    key,
                    sku: raw.sku.into(),
                    desc: raw.desc,
                });
            }
            Ok(items)
        }
    }

    // `skus_list:`, `skus_list: ~` and `skus_list: null` all mean no items
    deserializer.deserialize_option(SkusListVisitor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl StockConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| StockError::config(&source_name, format!("cannot read file: {}", e)))?;

        Self::parse(&content, ConfigFormat::from_path(path), &source_name)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse(content, ConfigFormat::Yaml, "<yaml>")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, ConfigFormat::Toml, "<toml>")
    }

    fn parse(content: &str, format: ConfigFormat, source_name: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        match format {
            ConfigFormat::Yaml => serde_yaml::from_str(&processed_content).map_err(|e| {
                StockError::config(source_name, format!("YAML parsing error: {}", e))
            }),
            ConfigFormat::Toml => toml::from_str(&processed_content).map_err(|e| {
                StockError::config(source_name, format!("TOML parsing error: {}", e))
            }),
        }
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| StockError::config("env_substitution", e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn items(&self) -> &[TrackedItem] {
        &self.best_buy.skus_list
    }

    pub fn webhook_url(&self) -> &str {
        &self.slack.webhook_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }
}

impl Validate for StockConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("postal_code", &self.postal_code)?;
        validation::validate_url("slack.webhook_url", &self.slack.webhook_url)?;
        validation::validate_url("best_buy.availability_url", &self.best_buy.availability_url)?;
        validation::validate_url("best_buy.offers_url", &self.best_buy.offers_url)?;
        validation::validate_non_empty_string("best_buy.user_agent", &self.best_buy.user_agent)?;
        validation::validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 300)?;

        for item in &self.best_buy.skus_list {
            validation::validate_non_empty_string(
                &format!("best_buy.skus_list.{}.sku", item.key),
                &item.sku,
            )?;
        }

        Ok(())
    }
}
