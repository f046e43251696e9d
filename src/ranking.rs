//! League ranking operations
//!
//! The [`Ranking`] type ties together match parsing, storage, and the
//! standings computation; it is the only part of the program that the
//! command-line interface talks to.
use std::path::PathBuf;

use crate::matches::{Match, MatchError};
use crate::standings::Standings;
use crate::store::{Store, StoreError};

/// Ranking operation errors
#[derive(Debug, PartialEq)]
#[derive(thiserror::Error)]
pub enum RankingError {
    /// Invalid match input
    #[error(transparent)]
    Match(#[from] MatchError),

    /// Database access failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A league ranking, backed by a match record database
#[derive(Clone, Debug)]
pub struct Ranking {
    store: Store,
}

impl Ranking {
    /// Open the ranking stored in the database at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: Store::new(path),
        }
    }

    /// Create an empty ranking database at `path`
    ///
    /// Any existing database at `path` is reset.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let ranking = Self::new(path);
        ranking.store.initialize()?;
        log::info!("Initialized database at {}", ranking.store.path().display());
        Ok(ranking)
    }

    /// Get the underlying database
    #[cfg(test)]
    pub(crate) fn store(&self) -> &Store {
        &self.store
    }

    /// Parse a match result and add it to the database
    ///
    /// Invalid input is rejected before the database is accessed.
    pub fn add(&self, input: &str) -> Result<Match, RankingError> {
        let new_match = input.parse::<Match>().inspect_err(|error| {
            log::warn!("Rejected match `{input}`: {error}");
        })?;
        let mut matches = self.store.read_all()?;
        matches.push(new_match.clone());
        self.store.write_all(matches)?;
        log::info!("Added match `{new_match}`");
        Ok(new_match)
    }

    /// Get all matches, in the order they were added
    pub fn list_all(&self) -> Result<Vec<Match>, StoreError> {
        self.store.read_all()
    }

    /// Compute the current standings
    pub fn standings(&self) -> Result<Standings, StoreError> {
        self.store
            .read_all()
            .map(|matches| Standings::compute(&matches))
    }

    /// Remove all matches from the database
    pub fn clean(&self) -> Result<(), StoreError> {
        self.store.write_all(Vec::new())?;
        log::info!("Removed all matches");
        Ok(())
    }
}
