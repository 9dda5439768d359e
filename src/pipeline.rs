// src/pipeline.rs

use std::path::Path;

use futures::{stream, StreamExt};
use tracing::{error, info, instrument, warn};
use url::Url;

use crate::config::{FailurePolicy, ScrapeConfig};
use crate::error::ScrapeError;
use crate::export::export;
use crate::fetch::Scraper;
use crate::model::{MunicipalityRef, MunicipalityResult};

/// A municipality left out of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMunicipality {
    pub code: String,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub discovered: usize,
    pub exported: usize,
    pub skipped: Vec<SkippedMunicipality>,
}

/// Listing → detail pages → CSV at `output`.
#[instrument(level = "info", skip_all, fields(listing = %listing_url))]
pub async fn run(
    config: &ScrapeConfig,
    listing_url: &Url,
    output: &Path,
) -> Result<RunReport, ScrapeError> {
    let scraper = Scraper::new(config)?;

    let refs = scraper.fetch_index(listing_url).await?;
    let discovered = refs.len();

    let (results, skipped) = collect_results(
        &scraper,
        refs,
        config.concurrency,
        config.failure_policy,
    )
    .await?;

    export(&results, output)?;
    info!(
        discovered,
        exported = results.len(),
        skipped = skipped.len(),
        "run complete"
    );

    Ok(RunReport {
        discovered,
        exported: results.len(),
        skipped,
    })
}

/// Fetch every detail page, at most `concurrency` at a time.
///
/// Results come back in `refs` order regardless of which request finishes
/// first; the export column order depends on it.
pub async fn collect_results(
    scraper: &Scraper,
    refs: Vec<MunicipalityRef>,
    concurrency: usize,
    policy: FailurePolicy,
) -> Result<(Vec<MunicipalityResult>, Vec<SkippedMunicipality>), ScrapeError> {
    let mut results = Vec::with_capacity(refs.len());
    let mut skipped = Vec::new();

    let mut pending = stream::iter(refs.into_iter().map(|municipality| async move {
        let outcome = scraper.fetch_results(&municipality.detail_url).await;
        (municipality, outcome)
    }))
    .buffered(concurrency.max(1));

    while let Some((municipality, outcome)) = pending.next().await {
        match outcome {
            Ok(tally) => results.push(MunicipalityResult::from_parts(municipality, tally)),
            Err(e) if policy == FailurePolicy::Skip && e.is_per_municipality() => {
                warn!(
                    code = %municipality.code,
                    name = %municipality.name,
                    error = %e,
                    "skipping municipality"
                );
                skipped.push(SkippedMunicipality {
                    code: municipality.code,
                    name: municipality.name,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                error!(
                    code = %municipality.code,
                    name = %municipality.name,
                    error = %e,
                    "municipality failed, aborting"
                );
                return Err(e);
            }
        }
    }

    Ok((results, skipped))
}
