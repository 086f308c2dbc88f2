//! Speed Snek - a pointer-driven snake reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (trail, body reconstruction, collisions, game state)
//! - `game`: Round orchestration with high-score persistence
//! - `render`: Drawing interface consumed by the platform front end
//! - `persistence`: High-score storage port
//! - `settings`: Data-driven tunables
//! - `platform`: Board sizing and the browser canvas surface

pub mod game;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use persistence::{HighScoreStore, MemoryStore};
pub use settings::{Difficulty, Settings, SettingsError};

/// A point on the play surface, in canvas-local pixels
pub type Point = glam::DVec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Body links at the start of a round
    pub const INITIAL_SEGMENTS: usize = 4;
    /// Fixed length of every body link (px)
    pub const SEG_LENGTH: f64 = 50.0;
    /// Stroke width of the body (px)
    pub const BODY_WIDTH: f64 = 10.0;

    /// Pellet radius (px)
    pub const ITEM_RADIUS: f64 = 15.0;
    /// Clearance kept between a new pellet and the walls / body (px)
    pub const PLACEMENT_BUFFER: f64 = 30.0;
    /// Rejection-sampling attempts before the placement buffer is relaxed
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 500;

    /// Speed limit increase per pellet (px/ms)
    pub const SPEED_INCREMENT: f64 = 0.05;
    /// Speed limit ceiling (px/ms)
    pub const MAX_SPEED: f64 = 5.0;
    /// Smoothing time constant for the speedometer (seconds)
    pub const SPEED_TAU_SECS: f64 = 0.5;
    /// Trail steps averaged per raw speed sample
    pub const SPEED_WINDOW: usize = 1;

    /// Countdown before play starts (seconds)
    pub const COUNTDOWN_SECS: f64 = 3.0;
    /// Radius of the start circle in the centre of the play area (px)
    pub const READY_RADIUS: f64 = 30.0;
    /// Distance from an edge at which the head counts as hitting the wall (px)
    pub const WALL_TOLERANCE: f64 = 1.0;
}
