//! Best arcade score
//!
//! Persisted as a bare integer under its own storage key.

use crate::persistence::{self, KeyValueStore};

/// Best score tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    best: u32,
}

impl BestScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "kebab-tycoon-best";

    pub fn new() -> Self {
        Self::default()
    }

    /// Current best (0 when nothing recorded)
    pub fn get(&self) -> u32 {
        self.best
    }

    /// Check if a score would set a new best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from storage
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            best: persistence::load_or_default(store, Self::STORAGE_KEY),
        }
    }

    /// Save to storage (best-effort)
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        persistence::save_best_effort(store, Self::STORAGE_KEY, &self.best);
        log::info!("Best score saved ({})", self.best);
    }
}
