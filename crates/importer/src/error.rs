use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("HTTP error {status}: {url}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to serialize JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::error::StorageError),
}

impl ImporterError {
    /// True when the external source, not our own storage, caused the failure.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::RequestError(_) | Self::UpstreamStatus { .. } | Self::Selector(_)
        )
    }
}

impl From<scraper::error::SelectorErrorKind<'_>> for ImporterError {
    fn from(error: scraper::error::SelectorErrorKind<'_>) -> Self {
        Self::Selector(error.to_string())
    }
}
