// src/config.rs

use url::Url;

/// Relative detail links on the listing page resolve against this.
pub const DEFAULT_BASE_URL: &str = "https://www.volby.cz/pls/ps2017nss/";

/// Example district listing (Prostějov).
pub const EXAMPLE_LISTING_URL: &str =
    "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=12&xnumnuts=7103";

pub const USER_AGENT: &str = concat!("volby-scraper/", env!("CARGO_PKG_VERSION"));

/// What to do when a single municipality cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log it, leave the row out, keep going.
    #[default]
    Skip,
    /// Stop the run with that error.
    Abort,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: Url,
    /// Detail pages in flight at once. 1 means strictly sequential.
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL should parse"),
            concurrency: 1,
            failure_policy: FailurePolicy::Skip,
            user_agent: USER_AGENT.to_string(),
        }
    }
}
