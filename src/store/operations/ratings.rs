use std::collections::HashMap;

use crate::rating::INITIAL_RATING;
use crate::store::{Store, StoreError};

impl Store {
    /// Read the entire ratings table.
    ///
    /// Entries that cannot be decoded (non-UTF-8 name, value that does not
    /// parse as a number) are purged from the tree as a side effect and
    /// omitted from the result. The purge is not surfaced to the caller.
    pub fn all_ratings(&self) -> Result<HashMap<String, f64>, StoreError> {
        let mut table = HashMap::new();

        for entry in self.ratings.iter() {
            let (key, raw) = entry?;
            match decode_player(&key).and_then(|name| Some((name, parse_rating(&raw)?))) {
                Some((name, value)) => {
                    table.insert(name, value);
                }
                None => {
                    tracing::warn!(
                        key = %String::from_utf8_lossy(&key),
                        "Purging unparseable rating entry"
                    );
                    self.ratings.remove(&key)?;
                }
            }
        }

        Ok(table)
    }

    /// Current rating for one player, `None` if never written.
    /// Applies the same purge-on-corrupt behavior as `all_ratings`.
    pub fn rating(&self, name: &str) -> Result<Option<f64>, StoreError> {
        match self.ratings.get(name.as_bytes())? {
            Some(raw) => match parse_rating(&raw) {
                Some(value) => Ok(Some(value)),
                None => {
                    tracing::warn!(player = name, "Purging unparseable rating entry");
                    self.ratings.remove(name.as_bytes())?;
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Write one player's rating, creating the entry if absent.
    pub fn set_rating(&self, name: &str, value: f64) -> Result<(), StoreError> {
        self.ratings
            .insert(name.as_bytes(), value.to_string().as_bytes())?;
        Ok(())
    }

    /// Write the initial rating for a player, unconditionally overwriting
    /// any existing entry. Re-registering resets the player's progress.
    pub fn register_player(&self, name: &str) -> Result<(), StoreError> {
        self.set_rating(name, INITIAL_RATING)
    }
}

fn decode_player(key: &[u8]) -> Option<String> {
    std::str::from_utf8(key).ok().map(str::to_string)
}

fn parse_rating(raw: &[u8]) -> Option<f64> {
    std::str::from_utf8(raw).ok()?.parse::<f64>().ok()
}
