//! Match orchestration: read current ratings, run the Elo update, write
//! both sides back. Also the truncated read paths the ratings API serves.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::rating::{self, INITIAL_RATING};
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("winner and loser are the same player: {0}")]
    SelfMatch(String),
    #[error("rating store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
    #[error("partial rating update: {updated} was written, write for {failed} failed: {source}")]
    PartialUpdate {
        updated: String,
        failed: String,
        #[source]
        source: StoreError,
    },
}

/// Ratings as they stand after a recorded match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchUpdate {
    pub winner: String,
    pub winner_rating: f64,
    pub loser: String,
    pub loser_rating: f64,
}

/// Stateless orchestrator over an injected store handle. Safe to call from
/// any number of concurrent request tasks; it holds no locks of its own.
#[derive(Clone)]
pub struct MatchService {
    store: Arc<Store>,
}

impl MatchService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Record a decided match and update both players' ratings.
    ///
    /// The read-compute-write sequence is not transactional: a concurrent
    /// match touching the same player between the table read and the writes
    /// below overwrites this update (last writer wins). Each write is
    /// attempted independently; if exactly one fails the store is left
    /// inconsistent and the caller is told so via `PartialUpdate`.
    pub fn record_match(&self, winner: &str, loser: &str) -> Result<MatchUpdate, ServiceError> {
        if winner == loser {
            return Err(ServiceError::SelfMatch(winner.to_string()));
        }

        let table = self.store.all_ratings()?;
        let winner_rating = table.get(winner).copied().unwrap_or(INITIAL_RATING);
        let loser_rating = table.get(loser).copied().unwrap_or(INITIAL_RATING);

        let (new_winner, new_loser) = rating::update(winner_rating, loser_rating);

        let winner_write = self.store.set_rating(winner, new_winner);
        let loser_write = self.store.set_rating(loser, new_loser);

        match (winner_write, loser_write) {
            (Ok(()), Ok(())) => {
                tracing::info!(
                    winner,
                    loser,
                    winner_rating = new_winner,
                    loser_rating = new_loser,
                    "Match recorded"
                );
                Ok(MatchUpdate {
                    winner: winner.to_string(),
                    winner_rating: new_winner,
                    loser: loser.to_string(),
                    loser_rating: new_loser,
                })
            }
            (Err(e), Err(_)) => Err(ServiceError::StoreUnavailable(e)),
            (Err(e), Ok(())) => Err(ServiceError::PartialUpdate {
                updated: loser.to_string(),
                failed: winner.to_string(),
                source: e,
            }),
            (Ok(()), Err(e)) => Err(ServiceError::PartialUpdate {
                updated: winner.to_string(),
                failed: loser.to_string(),
                source: e,
            }),
        }
    }

    /// (Re)register a player at the initial rating, discarding any match
    /// history. Returns the truncated rating that was written.
    pub fn register_player(&self, name: &str) -> Result<i64, ServiceError> {
        self.store.register_player(name)?;
        Ok(INITIAL_RATING as i64)
    }

    /// Truncated current rating; unknown players read as the initial rating
    /// without a store entry being created.
    pub fn rating_of(&self, name: &str) -> Result<i64, ServiceError> {
        let value = self.store.rating(name)?.unwrap_or(INITIAL_RATING);
        Ok(value as i64)
    }

    /// The whole table, truncated.
    pub fn all_ratings_truncated(&self) -> Result<HashMap<String, i64>, ServiceError> {
        let table = self.store.all_ratings()?;
        Ok(table.into_iter().map(|(name, v)| (name, v as i64)).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::tempdir;

    use crate::store::Store;

    use super::*;

    fn service(dir: &tempfile::TempDir) -> MatchService {
        let store = Arc::new(Store::open(dir.path().join("db").to_str().unwrap()).unwrap());
        MatchService::new(store)
    }

    #[test]
    fn fresh_players_land_on_1616_and_1584() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        svc.register_player("a").unwrap();
        svc.register_player("b").unwrap();
        let update = svc.record_match("a", "b").unwrap();

        assert_eq!(update.winner_rating as i64, 1616);
        assert_eq!(update.loser_rating as i64, 1584);
        assert_eq!(svc.rating_of("a").unwrap(), 1616);
        assert_eq!(svc.rating_of("b").unwrap(), 1584);
    }

    #[test]
    fn unregistered_players_are_scored_from_the_initial_rating() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let update = svc.record_match("ghost", "phantom").unwrap();
        assert_eq!(update.winner_rating as i64, 1616);
        assert_eq!(update.loser_rating as i64, 1584);
    }

    #[test]
    fn self_match_is_rejected() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        let err = svc.record_match("a", "a").unwrap_err();
        assert!(matches!(err, ServiceError::SelfMatch(ref name) if name == "a"));
    }

    #[test]
    fn unknown_player_reads_default_without_materializing() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        assert_eq!(svc.rating_of("neverseen").unwrap(), 1600);
        assert!(svc.all_ratings_truncated().unwrap().is_empty());
    }

    #[test]
    fn re_registration_discards_match_history() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        svc.register_player("a").unwrap();
        svc.record_match("a", "b").unwrap();
        assert_eq!(svc.rating_of("a").unwrap(), 1616);

        svc.register_player("a").unwrap();
        assert_eq!(svc.rating_of("a").unwrap(), 1600);
    }

    #[test]
    fn corrupt_entry_reads_as_fresh_player() {
        let dir = tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path().join("db").to_str().unwrap()).unwrap());
        let svc = MatchService::new(store.clone());

        store.ratings.insert(b"y", b"garbage").unwrap();
        assert!(svc.all_ratings_truncated().unwrap().is_empty());
        assert_eq!(svc.rating_of("y").unwrap(), 1600);
    }

    #[test]
    fn ratings_drift_apart_over_repeated_wins() {
        let dir = tempdir().unwrap();
        let svc = service(&dir);

        for _ in 0..10 {
            svc.record_match("strong", "weak").unwrap();
        }
        let table = svc.all_ratings_truncated().unwrap();
        assert!(table["strong"] > 1616);
        assert!(table["weak"] < 1584);
        // Wins against an increasingly weaker opponent are worth less.
        assert!(table["strong"] - 1600 < 160);
    }
}
