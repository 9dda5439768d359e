// src/model.rs

use std::collections::{HashMap, HashSet};
use url::Url;

/// One municipality row from the district listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRef {
    pub code: String,
    pub name: String,
    pub detail_url: Url,
}

/// Counters and party votes read from one detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityTally {
    pub registered: String,
    pub envelopes: String,
    pub valid: String,
    pub parties: PartyVotes,
}

/// A listing row merged with its detail-page tally; one exported CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityResult {
    pub code: String,
    pub name: String,
    pub registered: String,
    pub envelopes: String,
    pub valid: String,
    pub parties: PartyVotes,
}

impl MunicipalityResult {
    pub fn from_parts(municipality: MunicipalityRef, tally: MunicipalityTally) -> Self {
        Self {
            code: municipality.code,
            name: municipality.name,
            registered: tally.registered,
            envelopes: tally.envelopes,
            valid: tally.valid,
            parties: tally.parties,
        }
    }
}

/// Party name → vote count text, iterated in first-insertion order.
///
/// Re-inserting a party replaces its count but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyVotes {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PartyVotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous count when `party` was already present.
    pub fn insert(&mut self, party: impl Into<String>, votes: impl Into<String>) -> Option<String> {
        let party = party.into();
        let votes = votes.into();
        match self.index.get(&party) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, votes)),
            None => {
                self.index.insert(party.clone(), self.entries.len());
                self.entries.push((party, votes));
                None
            }
        }
    }

    pub fn get(&self, party: &str) -> Option<&str> {
        self.index.get(party).map(|&i| self.entries[i].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: Into<String>, V: Into<String>> FromIterator<(P, V)> for PartyVotes {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut votes = PartyVotes::new();
        for (party, count) in iter {
            votes.insert(party, count);
        }
        votes
    }
}

/// Party column schedule: distinct names in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyColumns {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl PartyColumns {
    /// Scan results in input order, and each result's parties in stored order.
    pub fn from_results(results: &[MunicipalityResult]) -> Self {
        let mut columns = Self::default();
        for result in results {
            for party in result.parties.names() {
                columns.push(party);
            }
        }
        columns
    }

    /// Appends `party` unless already present.
    pub fn push(&mut self, party: &str) {
        if self.seen.insert(party.to_string()) {
            self.order.push(party.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
