// src/fetch/results.rs

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument, trace};
use url::Url;

use super::{cell_text, Scraper};
use crate::error::{ScrapeError, SummaryField};
use crate::model::{MunicipalityTally, PartyVotes};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("table selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("row selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("cell selector"));

// `headers` is a token list; `~=` matches one token of it.
static REGISTERED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"td[headers~="sa2"]"#).expect("registered selector"));
static ENVELOPES: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"td[headers~="sa3"]"#).expect("envelopes selector"));
static VALID: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"td[headers~="sa6"]"#).expect("valid selector"));

fn summary_selector(field: SummaryField) -> &'static Selector {
    match field {
        SummaryField::Registered => &REGISTERED,
        SummaryField::Envelopes => &ENVELOPES,
        SummaryField::Valid => &VALID,
    }
}

/// Header and sub-header rows at the top of each party table.
const PARTY_HEADER_ROWS: usize = 2;
/// Number, name, votes, percent, preferential-votes link.
const PARTY_ROW_CELLS: usize = 5;
/// First-cell marker for parties that did not stand in the municipality.
const PLACEHOLDER: &str = "-";

impl Scraper {
    /// Fetch one municipality's detail page and extract its tally.
    #[instrument(level = "debug", skip(self, url), fields(url = %url))]
    pub async fn fetch_results(&self, url: &Url) -> Result<MunicipalityTally, ScrapeError> {
        let body = self.get_text(url).await?;
        let tally = parse_results(&body)?;
        debug!(parties = tally.parties.len(), "parsed detail page");
        Ok(tally)
    }
}

/// Summary counters come from the cells whose `headers` list names them; party votes from
/// every table after the first.
///
/// A party listed twice overwrites its earlier count.
pub fn parse_results(html: &str) -> Result<MunicipalityTally, ScrapeError> {
    let doc = Html::parse_document(html);

    let summary = |field: SummaryField| -> Result<String, ScrapeError> {
        doc.select(summary_selector(field))
            .next()
            .map(|el| cell_text(&el))
            .ok_or(ScrapeError::MissingField { field })
    };
    let registered = summary(SummaryField::Registered)?;
    let envelopes = summary(SummaryField::Envelopes)?;
    let valid = summary(SummaryField::Valid)?;

    let mut parties = PartyVotes::new();
    for table in doc.select(&TABLE).skip(1) {
        for row in table.select(&ROW).skip(PARTY_HEADER_ROWS) {
            let cells: Vec<_> = row.select(&CELL).collect();
            if cells.len() != PARTY_ROW_CELLS {
                continue;
            }
            if cell_text(&cells[0]) == PLACEHOLDER {
                continue;
            }
            let party = cell_text(&cells[1]);
            let votes = cell_text(&cells[2]);
            trace!(%party, %votes, "party row");
            if let Some(previous) = parties.insert(party.clone(), votes) {
                debug!(%party, %previous, "party listed twice, keeping the later count");
            }
        }
    }

    Ok(MunicipalityTally {
        registered,
        envelopes,
        valid,
        parties,
    })
}
