//! Character data scraped from a Fandom-style wiki: one listing page for the
//! roster and one article per character for its portrait.

mod character_page;
mod client;
mod roster_page;

pub use character_page::extract_thumbnail;
pub use client::WikiClient;
pub use roster_page::{RosterPageParser, RosterRow, SkipReason};

use storage::models::NewCharacter;
use tracing::info;

use crate::{ImageSource, Result, RosterSource};

pub const DEFAULT_BASE_URL: &str = "https://jujutsu-kaisen.fandom.com";
pub const DEFAULT_LIST_PATH: &str = "/wiki/List_of_Characters";

#[derive(Debug, Clone)]
pub struct WikiConfig {
    pub base_url: String,
    pub list_path: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_path: DEFAULT_LIST_PATH.to_string(),
        }
    }
}

pub struct WikiSource {
    client: WikiClient,
    list_path: String,
    parser: RosterPageParser,
}

impl WikiSource {
    pub fn new(config: &WikiConfig) -> Result<Self> {
        Ok(Self {
            client: WikiClient::new(&config.base_url)?,
            list_path: config.list_path.clone(),
            parser: RosterPageParser::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait::async_trait]
impl RosterSource for WikiSource {
    async fn fetch_roster(&self) -> Result<Vec<NewCharacter>> {
        let url = self.client.listing_url(&self.list_path);
        info!("Fetching character listing from {}", url);

        let html = self.client.fetch_html(&url).await?;
        let entries = self.parser.parse(&html)?;

        info!("Scraped {} characters", entries.len());
        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "Fandom wiki"
    }
}

#[async_trait::async_trait]
impl ImageSource for WikiSource {
    async fn find_image(&self, character_name: &str) -> Result<Option<String>> {
        let url = self.client.article_url(character_name)?;
        let html = self.client.fetch_html(&url).await?;

        extract_thumbnail(&html)
    }
}
