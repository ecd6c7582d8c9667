use std::collections::HashSet;
use std::time::Duration;

use axum::body::Bytes;
use reqwest::Url;

use crate::error::WebError;

/// Hosts the proxy may fetch from. Empty means any host.
#[derive(Debug, Clone, Default)]
pub struct AllowedHosts {
    suffixes: HashSet<String>,
}

impl AllowedHosts {
    pub fn from_comma_separated(hosts: &str) -> Self {
        let suffixes = hosts
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_ascii_lowercase())
            .collect();

        Self { suffixes }
    }

    /// Matches the host itself or any of its subdomains.
    pub fn allows(&self, host: &str) -> bool {
        if self.suffixes.is_empty() {
            return true;
        }

        let host = host.to_ascii_lowercase();
        self.suffixes
            .iter()
            .any(|suffix| host == *suffix || host.ends_with(&format!(".{}", suffix)))
    }
}

pub struct ProxiedImage {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

pub struct ImageProxy {
    client: reqwest::Client,
    allowed: AllowedHosts,
}

impl ImageProxy {
    pub fn new(allowed: AllowedHosts) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("Mozilla/5.0 (compatible; roster-image-proxy/0.1)")
            .build()?;

        Ok(Self { client, allowed })
    }

    pub fn resolve(&self, raw: &str) -> Result<Url, WebError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| WebError::BadRequest(format!("Invalid url parameter: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(WebError::BadRequest(
                "Only http and https urls can be proxied".to_string(),
            ));
        }

        match url.host_str() {
            Some(host) if self.allowed.allows(host) => Ok(url),
            Some(host) => Err(WebError::BadRequest(format!("Host not allowed: {}", host))),
            None => Err(WebError::BadRequest("url has no host".to_string())),
        }
    }

    pub async fn fetch(&self, url: Url) -> Result<ProxiedImage, WebError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| WebError::BadGateway(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(WebError::BadGateway(format!(
                "HTTP error {}: {}",
                response.status(),
                url
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WebError::BadGateway(format!("{}: {}", url, e)))?;

        Ok(ProxiedImage {
            content_type,
            bytes,
        })
    }
}
