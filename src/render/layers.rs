//! Drawable game objects

use super::{Drawable, Surface, palette};
use crate::Point;
use crate::sim::{GameState, Item, Snake};

/// Width of the start circle outline (px)
const READY_RING_WIDTH: f64 = 5.0;
/// Speedometer bar width and gap (px)
const BAR_WIDTH: f64 = 6.0;
const BAR_GAP: f64 = 3.0;

impl Drawable for Snake {
    fn draw(&self, surface: &mut dyn Surface) {
        if !self.body().is_empty() {
            surface.polyline(self.body(), palette::SNAKE, self.width);
        }
    }
}

impl Drawable for Item {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.location, self.radius, palette::ITEM);
    }
}

/// The circle the pointer has to enter to start a round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadyArea {
    pub center: Point,
    pub radius: f64,
}

impl ReadyArea {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Drawable for ReadyArea {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.ring(self.center, self.radius, palette::READY_AREA, READY_RING_WIDTH);
    }
}

/// Strip of bars: red up to the speed limit, white up to the current speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speedometer {
    pub speed: f64,
    pub speed_limit: f64,
    pub max_speed: f64,
}

impl Speedometer {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            speed: state.speed.speed,
            speed_limit: state.speed.speed_limit,
            max_speed: state.settings.max_speed,
        }
    }

    /// Colour of the bar whose left edge sits at `fraction` of the strip
    fn bar_color(&self, fraction: f64) -> &'static str {
        if fraction < self.speed_limit / self.max_speed {
            palette::SPEED_LIMIT
        } else if fraction < self.speed / self.max_speed {
            palette::SPEED
        } else {
            palette::SPEED_EMPTY
        }
    }
}

impl Drawable for Speedometer {
    fn draw(&self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        if width <= 0.0 || self.max_speed <= 0.0 {
            return;
        }
        let pitch = BAR_WIDTH + BAR_GAP;
        let count = (width / pitch).floor() as usize;

        for n in 0..=count {
            let left = pitch * n as f64;
            let color = self.bar_color((left - BAR_GAP) / width);
            surface.bar(
                left + BAR_WIDTH / 2.0,
                BAR_WIDTH / 2.0,
                height - BAR_WIDTH / 2.0,
                color,
                BAR_WIDTH,
            );
        }
    }
}
