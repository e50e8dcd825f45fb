//! Client configuration.

use crate::error::{ClientError, Result};
use url::Url;

/// Backend address used when nothing else is configured.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Validate and normalise a base URL (http or https, no trailing slash).
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| ClientError::Config(format!("{}: {}", base_url, e)))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ClientError::Config(format!(
                    "unsupported scheme {:?} in {}",
                    other, base_url
                )))
            }
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ClientError::Config(format!(
                "base URL must not carry a query or fragment: {}",
                base_url
            )));
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server() {
        assert_eq!(ClientConfig::default().base_url(), DEFAULT_SERVER);
    }

    #[test]
    fn test_trailing_slash_removed() {
        let config = ClientConfig::new("http://localhost:8080/").unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.endpoint("/ask"), "http://localhost:8080/ask");
    }

    #[test]
    fn test_path_prefix_kept() {
        let config = ClientConfig::new("https://example.com/slides/").unwrap();
        assert_eq!(config.endpoint("/upload"), "https://example.com/slides/upload");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(ClientConfig::new("not a url"), Err(ClientError::Config(_))));
        assert!(matches!(ClientConfig::new("ftp://host"), Err(ClientError::Config(_))));
        assert!(matches!(
            ClientConfig::new("http://host/?x=1"),
            Err(ClientError::Config(_))
        ));
    }
}
