//! Pellet placement
//!
//! Rejection sampling: draw uniform points inside the play area until one is
//! clear of the body. Retries are bounded; when the body leaves no room the
//! clearance is relaxed, and as a last resort the pellet goes to the centre.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::geometry::path_within_radius;
use crate::Point;

/// A pellet the snake can eat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub location: Point,
    pub radius: f64,
}

/// How a placement was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Found a spot with the full clearance
    Clear,
    /// Only found a spot once the body clearance was dropped to the pellet radius
    Relaxed,
    /// Gave up sampling and used the centre of the play area
    Fallback,
}

impl Item {
    pub fn new(location: Point, radius: f64) -> Self {
        Self { location, radius }
    }

    /// Move the pellet to a random spot clear of `no_go`
    ///
    /// Samples lie within `buffer` of every wall. A sample is rejected when any
    /// link of `no_go` comes within `radius + buffer` of it.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: &Bounds,
        no_go: &[Point],
        buffer: f64,
        max_attempts: u32,
    ) -> Placement {
        if let Some(location) =
            self.sample_clear(rng, bounds, no_go, buffer, self.radius + buffer, max_attempts)
        {
            self.location = location;
            return Placement::Clear;
        }

        log::warn!(
            "No pellet spot with {:.0}px clearance after {} attempts, relaxing",
            buffer,
            max_attempts
        );
        if let Some(location) =
            self.sample_clear(rng, bounds, no_go, buffer, self.radius, max_attempts)
        {
            self.location = location;
            return Placement::Relaxed;
        }

        log::error!("Pellet placement exhausted, using play-area centre");
        self.location = bounds.center();
        Placement::Fallback
    }

    fn sample_clear<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bounds: &Bounds,
        no_go: &[Point],
        buffer: f64,
        clearance: f64,
        max_attempts: u32,
    ) -> Option<Point> {
        for _ in 0..max_attempts {
            let candidate = Point::new(
                sample_axis(rng, buffer, bounds.width - buffer),
                sample_axis(rng, buffer, bounds.height - buffer),
            );
            if !path_within_radius(no_go, candidate, clearance) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Uniform in `[min, max)`, or the midpoint when the range is empty
fn sample_axis<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min < max {
        rng.random_range(min..max)
    } else {
        (min + max) / 2.0
    }
}
