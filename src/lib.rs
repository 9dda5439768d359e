pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod model;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ScrapeError, SummaryField};
pub use model::{MunicipalityRef, MunicipalityResult, MunicipalityTally, PartyColumns, PartyVotes};
