use crate::utils::error::{Result, StockError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(StockError::config(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(StockError::config(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(StockError::config(
            field_name,
            format!("Invalid URL format '{}': {}", url_str, e),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StockError::config(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(StockError::config(
            field_name,
            format!("Value {} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("slack.webhook_url", "https://hooks.slack.com/services/T/B/X").is_ok());
        assert!(validate_url("slack.webhook_url", "http://localhost:8080/hook").is_ok());
        assert!(validate_url("slack.webhook_url", "").is_err());
        assert!(validate_url("slack.webhook_url", "invalid-url").is_err());
        assert!(validate_url("slack.webhook_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("postal_code", "H2X 1Y4").is_ok());
        assert!(validate_non_empty_string("postal_code", "   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("http.timeout_seconds", 30, 1, 300).is_ok());
        assert!(validate_range("http.timeout_seconds", 0, 1, 300).is_err());
        assert!(validate_range("http.timeout_seconds", 301, 1, 300).is_err());
    }
}
