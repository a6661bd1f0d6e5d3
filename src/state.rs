use crate::{engine::MatchingEngine, trade::Trade};
use std::sync::{Arc, Mutex};

/// Shared handle for concurrent submitters. Matching correctness depends on
/// a total order of submissions per instrument, so the engine sits behind a
/// single mutex; callers hold the lock for the whole `submit` call.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Mutex<MatchingEngine>>,
    pub trade_log: Arc<Mutex<Vec<Trade>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            engine: Arc::new(Mutex::new(MatchingEngine::default())),
            trade_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
