// src/fetch/index.rs

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, instrument, trace, warn};
use url::Url;

use super::{cell_text, Scraper};
use crate::error::ScrapeError;
use crate::model::MunicipalityRef;

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("row selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("cell selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("link selector"));

impl Scraper {
    /// Fetch the district listing and return its municipalities in page order.
    #[instrument(level = "info", skip(self, url), fields(url = %url))]
    pub async fn fetch_index(&self, url: &Url) -> Result<Vec<MunicipalityRef>, ScrapeError> {
        let body = self.get_text(url).await?;
        let refs = parse_index(&body, self.base_url());
        info!(count = refs.len(), "municipalities listed");
        Ok(refs)
    }
}

/// Every table row whose first cell holds a link becomes a `MunicipalityRef`.
///
/// Header and subtotal rows carry no link and are dropped. An empty result
/// is not an error.
pub fn parse_index(html: &str, base: &Url) -> Vec<MunicipalityRef> {
    let doc = Html::parse_document(html);
    let mut refs = Vec::new();

    for row in doc.select(&ROW) {
        let cells: Vec<_> = row.select(&CELL).collect();
        let Some(first) = cells.first() else {
            continue;
        };
        let Some(href) = first
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };

        let code = cell_text(first);
        let Some(second) = cells.get(1) else {
            warn!(%code, "listing row has a link but no name cell, skipping");
            continue;
        };
        let detail_url = match base.join(href.trim()) {
            Ok(u) => u,
            Err(e) => {
                warn!(%code, href, error = %e, "unresolvable detail link, skipping");
                continue;
            }
        };

        trace!(%code, url = %detail_url, "found municipality");
        refs.push(MunicipalityRef {
            code,
            name: cell_text(second),
            detail_url,
        });
    }

    refs
}
