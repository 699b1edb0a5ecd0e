use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::services::NoteService;
use crate::store::NoteStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub notes: NoteService,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn NoteStore>) -> Self {
        Self {
            config,
            notes: NoteService::new(store),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
