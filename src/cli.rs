// src/cli.rs

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::config::{FailurePolicy, ScrapeConfig, DEFAULT_BASE_URL, EXAMPLE_LISTING_URL};
use crate::error::ScrapeError;

/// Scrape Czech parliamentary election results for every municipality of a
/// district into one CSV file.
#[derive(Parser, Debug)]
#[command(
    name = "volby-scraper",
    version,
    after_help = "Example:\n  volby-scraper \"https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=12&xnumnuts=7103\" vysledky_prostejov.csv"
)]
pub struct Cli {
    /// District listing URL (http:// or https://).
    pub url: String,

    /// Output file, must end in .csv.
    pub output: PathBuf,

    /// Base URL that relative detail links are resolved against.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Detail pages fetched at once; output order is unaffected.
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Abort on the first municipality that fails instead of skipping it.
    #[arg(long)]
    pub fail_fast: bool,
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Invocation {
    Run(Cli),
    /// `--help` or `--version`: print the text and exit successfully.
    Info(String),
}

/// Parse `argv` (program name first). Usage errors become
/// `InvalidArgument`, so they exit with status 1 rather than clap's 2.
pub fn parse_args<I, T>(argv: I) -> Result<Invocation, ScrapeError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(argv) {
        Ok(cli) => Ok(Invocation::Run(cli)),
        Err(e) if e.use_stderr() => Err(ScrapeError::InvalidArgument(e.to_string())),
        Err(e) => Ok(Invocation::Info(e.render().to_string())),
    }
}

/// Checked arguments, ready for `pipeline::run`.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub listing_url: Url,
    pub output: PathBuf,
    pub config: ScrapeConfig,
}

impl Cli {
    /// Reject bad input before any network activity.
    pub fn validate(self) -> Result<RunArgs, ScrapeError> {
        let listing_url = parse_http_url(&self.url)?;
        let mut base_url = parse_http_url(&self.base_url)?;
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let is_csv = self
            .output
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(".csv"))
            .unwrap_or(false);
        if !is_csv {
            return Err(ScrapeError::InvalidArgument(format!(
                "output file must end in .csv, got {}",
                self.output.display()
            )));
        }

        if self.concurrency == 0 {
            return Err(ScrapeError::InvalidArgument(
                "concurrency must be at least 1".to_string(),
            ));
        }

        let config = ScrapeConfig {
            base_url,
            concurrency: self.concurrency,
            failure_policy: if self.fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Skip
            },
            ..ScrapeConfig::default()
        };

        Ok(RunArgs {
            listing_url,
            output: self.output,
            config,
        })
    }
}

/// Must start with `http://` or `https://` and parse as a URL.
pub fn parse_http_url(raw: &str) -> Result<Url, ScrapeError> {
    let raw = raw.trim();
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ScrapeError::InvalidArgument(format!(
            "URL must start with http:// or https://, got {:?} (e.g. {})",
            raw, EXAMPLE_LISTING_URL
        )));
    }
    Url::parse(raw).map_err(|e| ScrapeError::InvalidArgument(format!("invalid URL {:?}: {}", raw, e)))
}
