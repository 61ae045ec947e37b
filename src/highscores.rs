//! High score tracking
//!
//! A single best score, read once at startup and written only when a
//! finished run strictly beats it.

use crate::persistence::ScoreStore;

/// Best score so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "star_invaders_highscore";

    /// Read the stored value; absent means 0
    pub fn load<S: ScoreStore + ?Sized>(store: &S) -> Self {
        let best = store.get(Self::STORAGE_KEY).unwrap_or(0);
        log::info!("Loaded high score {}", best);
        Self { best }
    }

    /// Whether `score` would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record `score` if it beats the best, writing through `store`.
    ///
    /// Returns true when the in-memory best improved. A failed write is
    /// logged and otherwise ignored; the in-memory value stays improved.
    pub fn commit<S: ScoreStore + ?Sized>(&mut self, score: u64, store: &mut S) -> bool {
        if !self.qualifies(score) {
            return false;
        }

        self.best = score;
        match store.set(Self::STORAGE_KEY, score) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(e) => log::warn!("New high score {} not persisted: {}", score, e),
        }
        true
    }
}
