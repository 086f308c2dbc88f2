//! Snake simulation
//!
//! Everything that decides the outcome of a round lives here. Time only
//! advances through the pointer samples and frame times handed in, and all
//! randomness comes from the seeded generator in [`GameState`]. Nothing in
//! this module draws or touches the browser.

pub mod collision;
pub mod geometry;
pub mod item;
pub mod snake;
pub mod speed;
pub mod state;
pub mod tick;
pub mod trail;

pub use collision::{Bounds, hits_wall, reaches_item, self_collision};
pub use geometry::{
    Segment, distance, path_within_radius, segment_intersect_circle, segment_intersect_segment,
};
pub use item::{Item, Placement};
pub use snake::Snake;
pub use speed::{Smoothing, SpeedTracker};
pub use state::{GameOverReason, GamePhase, GameState, TickOutcome};
pub use tick::{countdown_remaining, frame, pointer_left, pointer_sample, restart, start, tick};
pub use trail::Trail;
