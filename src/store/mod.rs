pub mod operations;
pub mod trees;

use sled::Db;
use thiserror::Error;

/// Shared handle on the embedded key-value backend. Opened once at startup
/// and passed around as `Arc<Store>`; sled trees are internally synchronized,
/// so no additional locking lives here.
#[derive(Debug)]
pub struct Store {
    db: Db,
    pub ratings: sled::Tree,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
}

impl Store {
    pub fn open(sled_path: &str) -> Result<Self, StoreError> {
        let db = sled::open(sled_path)?;
        let ratings = db.open_tree(trees::RATINGS)?;

        Ok(Self { db, ratings })
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }
}
