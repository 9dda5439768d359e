// src/export.rs

use std::{fs::File, io, path::Path};

use csv::Writer;
use tracing::{info, instrument};

use crate::error::ScrapeError;
use crate::model::{MunicipalityResult, PartyColumns};

/// Fixed leading columns, before the party columns.
pub const FIXED_COLUMNS: [&str; 5] = ["code", "location", "registered", "envelopes", "valid"];

/// Written for a party that a municipality's tables did not list.
pub const ABSENT_VOTES: &str = "0";

/// Write `results` as CSV to `path`, replacing any existing file.
///
/// Nothing is cleaned up if writing fails part-way.
#[instrument(level = "info", skip(results, path), fields(path = %path.display(), rows = results.len()))]
pub fn export(results: &[MunicipalityResult], path: &Path) -> Result<(), ScrapeError> {
    let write_err = |source: csv::Error| ScrapeError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|e| write_err(e.into()))?;
    let columns = write_table(results, file).map_err(write_err)?;
    info!(party_columns = columns.len(), "export written");
    Ok(())
}

/// Header plus one row per result. Returns the party column schedule used.
pub fn write_table<W: io::Write>(
    results: &[MunicipalityResult],
    out: W,
) -> Result<PartyColumns, csv::Error> {
    let columns = PartyColumns::from_results(results);
    let mut wtr = Writer::from_writer(out);

    let mut header: Vec<&str> = FIXED_COLUMNS.to_vec();
    header.extend(columns.iter());
    wtr.write_record(&header)?;

    for r in results {
        let mut row: Vec<&str> = vec![
            r.code.as_str(),
            r.name.as_str(),
            r.registered.as_str(),
            r.envelopes.as_str(),
            r.valid.as_str(),
        ];
        row.extend(
            columns
                .iter()
                .map(|party| r.parties.get(party).unwrap_or(ABSENT_VOTES)),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(columns)
}
