//! Collision checks against the reconstructed body
//!
//! Each check is a pure query; deciding what a hit means is left to the tick.

use serde::{Deserialize, Serialize};

use super::geometry::{segment_intersect_segment, segment_within_radius, Segment};
use super::item::Item;
use crate::Point;
use crate::consts::WALL_TOLERANCE;

/// Play-area size (px), fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Whether the head has reached an edge of the play area
///
/// Anything within [`WALL_TOLERANCE`] of an edge counts.
pub fn hits_wall(head: Point, bounds: &Bounds) -> bool {
    head.x - WALL_TOLERANCE <= 0.0
        || bounds.width - WALL_TOLERANCE <= head.x
        || head.y - WALL_TOLERANCE <= 0.0
        || bounds.height - WALL_TOLERANCE <= head.y
}

/// Find the first body link crossed by the head link
///
/// The head link cannot cross itself or the link it shares a joint with, so
/// checking starts at link 2. Returns the index of the link hit.
pub fn self_collision(body: &[Point]) -> Option<usize> {
    if body.len() < 4 {
        return None;
    }
    let head_link = (body[0], body[1]);
    (2..body.len() - 1)
        .find(|&i| segment_intersect_segment(head_link, (body[i], body[i + 1])).is_some())
}

/// Whether a movement segment reaches a pellet
///
/// The pellet's reach is its radius plus half the body width. Touching the
/// edge counts as eating it.
pub fn reaches_item(movement: Segment, item: &Item, body_width: f64) -> bool {
    segment_within_radius(movement, item.location, item.radius + body_width / 2.0)
}
