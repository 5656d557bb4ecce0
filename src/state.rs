use std::sync::Arc;
use std::time::Instant;

use crate::services::matches::MatchService;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    matches: MatchService,
    started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>) -> Self {
        let matches = MatchService::new(store.clone());

        Self {
            store,
            matches,
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn matches(&self) -> &MatchService {
        &self.matches
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
