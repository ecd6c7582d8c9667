use std::time::Duration;

use reqwest::Url;

use crate::error::{ImporterError, Result};

pub struct WikiClient {
    base_url: String,
    client: reqwest::Client,
}

impl WikiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; roster-importer/0.1)")
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a character's own article, e.g. `/wiki/Satoru_Gojo`.
    pub fn article_url(&self, title: &str) -> Result<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ImporterError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.set_path(&format!("/wiki/{}", title.trim().replace(' ', "_")));

        Ok(url.to_string())
    }

    pub fn listing_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching HTML from: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ImporterError::UpstreamStatus {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let html = response.text().await?;
        tracing::debug!("Fetched {} bytes of HTML", html.len());
        Ok(html)
    }
}
