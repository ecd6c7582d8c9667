use anyhow::{Context, Result};
use importer::{
    WikiConfig,
    roster::DEFAULT_DELAY_MS,
    sources::wiki::{DEFAULT_BASE_URL, DEFAULT_LIST_PATH},
};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub wiki: WikiConfig,
    pub backfill_delay_ms: u64,
    pub image_proxy_allowed_hosts: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            wiki: WikiConfig {
                base_url: std::env::var("ROSTER_SOURCE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                list_path: std::env::var("ROSTER_LIST_PATH")
                    .unwrap_or_else(|_| DEFAULT_LIST_PATH.to_string()),
            },
            backfill_delay_ms: match std::env::var("BACKFILL_DELAY_MS") {
                Ok(value) => value
                    .parse()
                    .context("BACKFILL_DELAY_MS must be a number of milliseconds")?,
                Err(_) => DEFAULT_DELAY_MS,
            },
            image_proxy_allowed_hosts: std::env::var("IMAGE_PROXY_ALLOWED_HOSTS")
                .unwrap_or_default(),
        })
    }
}
