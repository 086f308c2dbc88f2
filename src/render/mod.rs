//! Drawing interface
//!
//! The simulation never draws. Front ends implement [`Surface`] over whatever
//! they render to (a 2D canvas on the web) and call [`draw_frame`] and
//! [`draw_speedometer`] once per animation frame.

pub mod layers;

pub use layers::{ReadyArea, Speedometer};

use crate::Point;
use crate::sim::{GamePhase, GameState};

/// Colours used by the layers, as CSS colour strings
pub mod palette {
    pub const SNAKE: &str = "#94e34f";
    pub const ITEM: &str = "#49b9e6";
    pub const READY_AREA: &str = "#ff3333";
    /// Speedometer bars under the speed limit
    pub const SPEED_LIMIT: &str = "#ff3333";
    /// Speedometer bars under the current speed
    pub const SPEED: &str = "#fdfffc";
    /// Remaining speedometer bars
    pub const SPEED_EMPTY: &str = "#040406";
}

/// Something that can be drawn on, in play-area pixels
pub trait Surface {
    /// Drawable width and height
    fn size(&self) -> (f64, f64);

    fn clear(&mut self);

    /// Stroke a polyline with round caps and joins
    fn polyline(&mut self, points: &[Point], color: &str, width: f64);

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);

    /// Stroke a circle outline
    fn ring(&mut self, center: Point, radius: f64, color: &str, width: f64);

    /// Vertical rounded bar at `x` from `top` to `bottom`
    fn bar(&mut self, x: f64, top: f64, bottom: f64, color: &str, width: f64);
}

/// A game object that knows how to draw itself
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface);
}

/// Draw the play area for the current phase
pub fn draw_frame(state: &GameState, surface: &mut dyn Surface) {
    surface.clear();
    match state.phase {
        GamePhase::Title => {}
        GamePhase::Ready => {
            state.snake.draw(surface);
            ReadyArea::new(state.bounds.center(), state.settings.ready_radius).draw(surface);
        }
        GamePhase::Countdown { .. } => state.snake.draw(surface),
        GamePhase::Playing { .. } | GamePhase::GameOver(_) => {
            state.snake.draw(surface);
            if let Some(item) = &state.item {
                item.draw(surface);
            }
        }
    }
}

/// Draw the speed bar strip
pub fn draw_speedometer(state: &GameState, surface: &mut dyn Surface) {
    surface.clear();
    if state.phase != GamePhase::Title {
        Speedometer::from_state(state).draw(surface);
    }
}
