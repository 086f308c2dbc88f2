//! Round orchestration with best-score tracking
//!
//! [`Game`] wraps the simulation so front ends only deal with pointer events,
//! frames and a few buttons. The best score is loaded from a
//! [`HighScoreStore`] on creation and written back when a round that beat it
//! ends.

use crate::Point;
use crate::persistence::HighScoreStore;
use crate::settings::{Settings, SettingsError};
use crate::sim::tick;
use crate::sim::{Bounds, GamePhase, GameState, TickOutcome};

/// How long "GO!" stays up after the countdown (ms)
const GO_MESSAGE_MS: f64 = 1000.0;

/// A game session: simulation state plus persistence
pub struct Game<S: HighScoreStore> {
    state: GameState,
    store: S,
    best_score: u32,
    /// Whether the current round has beaten the stored best
    new_best: bool,
}

impl<S: HighScoreStore> Game<S> {
    /// Create a session on the title screen
    pub fn new(
        settings: Settings,
        bounds: Bounds,
        store: S,
        seed: u64,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        if !(bounds.width > 0.0 && bounds.height > 0.0) {
            return Err(SettingsError::Invalid {
                field: "bounds",
                reason: "width and height must be positive",
            });
        }

        let best_score = store.load_high_score().unwrap_or(0);
        log::info!("Game created (seed {}, best score {})", seed, best_score);
        Ok(Self {
            state: GameState::new(settings, bounds, seed),
            store,
            best_score,
            new_best: false,
        })
    }

    /// Read-only view for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Whether the current (or just finished) round set a new best
    pub fn is_new_best(&self) -> bool {
        self.new_best
    }

    /// Leave the title screen
    pub fn start(&mut self) -> bool {
        tick::start(&mut self.state)
    }

    pub fn pointer_sample(&mut self, point: Point, timestamp: f64) -> TickOutcome {
        let outcome = tick::pointer_sample(&mut self.state, point, timestamp);
        self.handle(outcome)
    }

    pub fn pointer_left(&mut self) -> TickOutcome {
        let outcome = tick::pointer_left(&mut self.state);
        self.handle(outcome)
    }

    pub fn frame(&mut self, now: f64) -> TickOutcome {
        let outcome = tick::frame(&mut self.state, now);
        self.handle(outcome)
    }

    /// New round, best score kept
    pub fn restart(&mut self, seed: u64) {
        tick::restart(&mut self.state, seed);
        self.new_best = false;
    }

    pub fn countdown_remaining(&self, now: f64) -> Option<u32> {
        tick::countdown_remaining(&self.state, now)
    }

    /// Text for the message line above the play area
    pub fn message(&self, now: f64) -> String {
        match self.state.phase {
            GamePhase::Title => String::new(),
            GamePhase::Ready => "Pointer on the circle to start".to_string(),
            GamePhase::Countdown { .. } => self
                .countdown_remaining(now)
                .map(|secs| secs.to_string())
                .unwrap_or_default(),
            GamePhase::Playing { started_at } => {
                if now - started_at < GO_MESSAGE_MS {
                    "GO!".to_string()
                } else {
                    String::new()
                }
            }
            GamePhase::GameOver(reason) => {
                let mut message = format!(
                    "Game Over! {} Your score: {}",
                    reason.message(),
                    self.state.score
                );
                if self.new_best {
                    message.push_str(" (NEW BEST!)");
                }
                message
            }
        }
    }

    fn handle(&mut self, outcome: TickOutcome) -> TickOutcome {
        match outcome {
            TickOutcome::Scored { score } => {
                if score > self.best_score {
                    self.best_score = score;
                    self.new_best = true;
                }
            }
            TickOutcome::GameOver(_) => {
                if self.new_best {
                    self.store.save_high_score(self.best_score);
                }
            }
            TickOutcome::Continue => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::{GameOverReason, Item};

    fn game(store: MemoryStore) -> Game<MemoryStore> {
        Game::new(Settings::default(), Bounds::new(800.0, 1200.0), store, 42).unwrap()
    }

    /// Title to Playing, with a pellet placed straight above the head
    fn play(game: &mut Game<MemoryStore>) -> f64 {
        game.start();
        game.pointer_sample(Point::new(400.0, 600.0), 0.0);
        game.frame(3001.0);
        game.state.item = Some(Item::new(Point::new(400.0, 500.0), 15.0));
        3001.0
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = Settings {
            seg_length: 0.0,
            ..Settings::default()
        };
        let result = Game::new(settings, Bounds::new(100.0, 100.0), MemoryStore::new(), 1);
        assert!(matches!(
            result,
            Err(SettingsError::Invalid {
                field: "seg_length",
                ..
            })
        ));

        let result = Game::new(
            Settings::default(),
            Bounds::new(0.0, 100.0),
            MemoryStore::new(),
            1,
        );
        assert!(matches!(
            result,
            Err(SettingsError::Invalid { field: "bounds", .. })
        ));
    }

    #[test]
    fn test_best_score_loaded_from_store() {
        let game = game(MemoryStore::with_score(9));
        assert_eq!(game.best_score(), 9);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_new_best_saved_on_game_over() {
        let mut game = game(MemoryStore::new());
        let t0 = play(&mut game);

        game.pointer_sample(Point::new(400.0, 560.0), t0 + 16.0);
        let outcome = game.pointer_sample(Point::new(400.0, 510.0), t0 + 32.0);
        assert_eq!(outcome, TickOutcome::Scored { score: 1 });
        assert_eq!(game.best_score(), 1);
        assert!(game.is_new_best());
        assert_eq!(game.store().saves, 0);

        let outcome = game.pointer_left();
        assert_eq!(outcome, TickOutcome::GameOver(GameOverReason::HitWall));
        assert_eq!(game.store().load_high_score(), Some(1));
        assert_eq!(game.store().saves, 1);
        assert!(game.message(t0 + 100.0).ends_with("(NEW BEST!)"));
    }

    #[test]
    fn test_lower_score_does_not_overwrite_best() {
        let mut game = game(MemoryStore::with_score(10));
        play(&mut game);
        game.pointer_left();

        assert_eq!(game.store().saves, 0);
        assert_eq!(game.best_score(), 10);
        assert!(!game.message(0.0).contains("NEW BEST"));
    }

    #[test]
    fn test_restart_keeps_best_score() {
        let mut game = game(MemoryStore::new());
        let t0 = play(&mut game);
        game.pointer_sample(Point::new(400.0, 510.0), t0 + 16.0);
        game.pointer_left();

        game.restart(7);
        assert_eq!(game.best_score(), 1);
        assert_eq!(game.score(), 0);
        assert!(!game.is_new_best());
        assert_eq!(game.state().phase, GamePhase::Ready);
    }

    #[test]
    fn test_messages_follow_phase() {
        let mut game = game(MemoryStore::new());
        assert_eq!(game.message(0.0), "");

        game.start();
        assert_eq!(game.message(0.0), "Pointer on the circle to start");

        game.pointer_sample(Point::new(400.0, 600.0), 100.0);
        assert_eq!(game.message(100.0), "3");
        assert_eq!(game.message(2200.0), "1");

        game.frame(3200.0);
        assert_eq!(game.message(3300.0), "GO!");
        assert_eq!(game.message(4300.0), "");

        game.pointer_left();
        assert_eq!(
            game.message(4400.0),
            "Game Over! You crashed into a wall! Your score: 0"
        );
    }
}
