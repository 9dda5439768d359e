// src/fetch/mod.rs

use reqwest::Client;
use scraper::ElementRef;
use tracing::debug;
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;

/// District listing page → municipality refs.
pub mod index;
/// Municipality detail page → summary counters and party votes.
pub mod results;

pub use index::parse_index;
pub use results::parse_results;

/// HTTP client bound to one site.
#[derive(Debug, Clone)]
pub struct Scraper {
    client: Client,
    base_url: Url,
}

impl Scraper {
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `url` and return the body; non-2xx counts as failure.
    async fn get_text(&self, url: &Url) -> Result<String, ScrapeError> {
        debug!("Fetching text from {}", url);
        let fetch_err = |source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        };
        self.client
            .get(url.clone())
            .send()
            .await
            .map_err(fetch_err)?
            .error_for_status()
            .map_err(fetch_err)?
            .text()
            .await
            .map_err(fetch_err)
    }
}

/// All text beneath `el`, trimmed.
pub(crate) fn cell_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
