//! Best-score persistence
//!
//! The game only needs a single number to survive between sessions. It is
//! stored behind [`HighScoreStore`] so the core never touches browser APIs:
//! - [`LocalStorageStore`] on the web (wasm32 only)
//! - [`MemoryStore`] for native runs and tests

/// Where the best score lives between sessions
pub trait HighScoreStore {
    /// Previously saved best score, if any
    fn load_high_score(&self) -> Option<u32>;

    /// Persist a new best score
    fn save_high_score(&mut self, score: u32);
}

/// In-memory store; forgets everything when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u32>,
    /// Number of saves, for checking write behaviour
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a best score already saved
    pub fn with_score(score: u32) -> Self {
        Self {
            best: Some(score),
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Option<u32> {
        self.best
    }

    fn save_high_score(&mut self, score: u32) {
        self.best = Some(score);
        self.saves += 1;
    }
}

/// Best score kept in the browser's LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "speed_snek_best_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load_high_score(&self) -> Option<u32> {
        let value = Self::storage()?.get_item(Self::STORAGE_KEY).ok()??;
        match value.parse() {
            Ok(score) => Some(score),
            Err(e) => {
                log::warn!("Ignoring stored best score {:?}: {}", value, e);
                None
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        if let Some(storage) = Self::storage() {
            if storage
                .set_item(Self::STORAGE_KEY, &score.to_string())
                .is_err()
            {
                log::warn!("Best score not saved");
            } else {
                log::info!("Best score saved ({})", score);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_high_score(), None);

        store.save_high_score(12);
        assert_eq!(store.load_high_score(), Some(12));
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_memory_store_with_score() {
        let store = MemoryStore::with_score(5);
        assert_eq!(store.load_high_score(), Some(5));
        assert_eq!(store.saves, 0);
    }
}
