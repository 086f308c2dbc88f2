//! Game state and round lifecycle types
//!
//! Everything a round needs lives in [`GameState`]; the renderer reads it and
//! only the tick functions mutate it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::item::{Item, Placement};
use super::snake::Snake;
use super::speed::SpeedTracker;
use super::trail::Trail;
use crate::settings::Settings;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Head link crossed the body
    HitSelf,
    /// Head reached the edge of the play area, or the pointer left it
    HitWall,
    /// Smoothed speed fell below the speed limit
    TooSlow,
}

impl GameOverReason {
    /// Player-facing explanation
    pub fn message(&self) -> &'static str {
        match self {
            GameOverReason::HitSelf => "You crashed into yourself!",
            GameOverReason::HitWall => "You crashed into a wall!",
            GameOverReason::TooSlow => "You were too slow!",
        }
    }
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Instructions shown, waiting for the start button
    Title,
    /// Waiting for the pointer to enter the start circle
    Ready,
    /// Snake follows the pointer, checks are off (timestamps in ms)
    Countdown { started_at: f64 },
    /// Active gameplay
    Playing { started_at: f64 },
    /// Round ended
    GameOver(GameOverReason),
}

/// Result of a single tick (pointer sample or frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing for the caller to act on
    Continue,
    /// A pellet was eaten; carries the new score
    Scored { score: u32 },
    /// The round just ended
    GameOver(GameOverReason),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Play-area size
    pub bounds: Bounds,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Raw pointer history
    pub trail: Trail,
    pub snake: Snake,
    /// Current pellet (placed when play starts)
    pub item: Option<Item>,
    pub speed: SpeedTracker,
    pub score: u32,
    /// Whether a pointer sample arrived since the last frame
    pub(crate) sampled_since_frame: bool,
}

impl GameState {
    /// Create a new game on the title screen
    pub fn new(settings: Settings, bounds: Bounds, seed: u64) -> Self {
        let snake = Snake::new(bounds.center(), &settings);
        let speed = SpeedTracker::new(settings.smoothing, settings.speed_window);
        let mut state = Self {
            settings,
            bounds,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title,
            trail: Trail::new(),
            snake,
            item: None,
            speed,
            score: 0,
            sampled_since_frame: false,
        };
        state.reset_round();
        state
    }

    /// Put the snake back in the centre and clear score, speed and pellet
    ///
    /// The phase is left alone; callers decide where the round resumes.
    pub fn reset_round(&mut self) {
        self.snake = Snake::new(self.bounds.center(), &self.settings);
        self.trail.clear();
        self.snake.seed_trail(&mut self.trail);
        self.speed.reset();
        self.item = None;
        self.score = 0;
        self.sampled_since_frame = false;
    }

    /// Place (or re-place) the pellet clear of the body
    pub fn place_item(&mut self) -> Placement {
        let mut item = self
            .item
            .unwrap_or_else(|| Item::new(self.bounds.center(), self.settings.item_radius));
        let placement = item.place(
            &mut self.rng,
            &self.bounds,
            self.snake.body(),
            self.settings.placement_buffer,
            self.settings.max_placement_attempts,
        );
        self.item = Some(item);
        placement
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, GamePhase::Playing { .. })
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_on_title_with_full_snake() {
        let state = GameState::new(Settings::default(), Bounds::new(400.0, 600.0), 1);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.snake.head(), Some(state.bounds.center()));
        assert!(state.snake.is_complete());
        assert!(state.item.is_none());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reset_round_clears_progress() {
        let mut state = GameState::new(Settings::default(), Bounds::new(400.0, 600.0), 1);
        state.score = 7;
        state.snake.grow();
        state.speed.raise_limit(1.0, 5.0);
        state.place_item();

        state.reset_round();
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.segments, state.settings.initial_segments);
        assert_eq!(state.speed.speed_limit, 0.0);
        assert!(state.item.is_none());
        assert_eq!(state.trail.head(), Some(state.bounds.center()));
    }

    #[test]
    fn test_place_item_avoids_snake() {
        let mut state = GameState::new(Settings::default(), Bounds::new(400.0, 600.0), 9);
        assert_eq!(state.place_item(), Placement::Clear);
        let item = state.item.unwrap();
        assert_eq!(item.radius, state.settings.item_radius);
        assert!(!crate::sim::geometry::path_within_radius(
            state.snake.body(),
            item.location,
            item.radius + state.settings.placement_buffer
        ));
    }

    #[test]
    fn test_reason_messages() {
        assert_eq!(GameOverReason::TooSlow.message(), "You were too slow!");
        assert_eq!(GameOverReason::HitWall.message(), "You crashed into a wall!");
        assert_eq!(GameOverReason::HitSelf.message(), "You crashed into yourself!");
    }
}
