// src/error.rs

use std::{fmt, path::PathBuf};

/// The three summary counters read from a municipality detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryField {
    Registered,
    Envelopes,
    Valid,
}

impl SummaryField {
    pub const ALL: [SummaryField; 3] = [Self::Registered, Self::Envelopes, Self::Valid];

    /// Value of the `headers` attribute carried by the summary cell.
    pub fn header_id(self) -> &'static str {
        match self {
            Self::Registered => "sa2",
            Self::Envelopes => "sa3",
            Self::Valid => "sa6",
        }
    }
}

impl fmt::Display for SummaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Registered => "registered voters",
            Self::Envelopes => "issued envelopes",
            Self::Valid => "valid votes",
        };
        write!(f, "{} (headers={})", name, self.header_id())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure or a non-success status.
    #[error("fetching {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("summary field missing: {field}")]
    MissingField { field: SummaryField },

    #[error("writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ScrapeError {
    /// Errors that only spoil a single municipality's row.
    pub fn is_per_municipality(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::MissingField { .. })
    }
}
