//! Body reconstruction from the pointer trail
//!
//! The body is rebuilt from scratch after every sample. Starting at the
//! freshest pointer position, the trail is walked towards older samples; each
//! time the walk reaches the circle of radius `seg_length` around the last
//! joint, the crossing point becomes the next joint. Links therefore have a constant
//! length however irregularly the pointer was sampled, and one long raw step
//! can produce several joints.

use super::geometry::{distance, segment_intersect_circle};
use super::trail::Trail;
use crate::Point;
use crate::settings::Settings;

/// The player's snake: a head-first polyline of fixed-length links
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Links the body should have; the body holds `segments + 1` joints when complete
    pub segments: usize,
    /// Length of every link (px)
    pub seg_length: f64,
    /// Stroke width (px), used for pickup reach and drawing
    pub width: f64,
    body: Vec<Point>,
}

impl Snake {
    /// A straight snake hanging below `start`, head first
    pub fn new(start: Point, settings: &Settings) -> Self {
        let body = (0..=settings.initial_segments)
            .map(|i| start + Point::new(0.0, i as f64 * settings.seg_length))
            .collect();
        Self {
            segments: settings.initial_segments,
            seg_length: settings.seg_length,
            width: settings.body_width,
            body,
        }
    }

    /// Joints, head first
    pub fn body(&self) -> &[Point] {
        &self.body
    }

    pub fn head(&self) -> Option<Point> {
        self.body.first().copied()
    }

    /// The link between the head and the next joint
    pub fn head_link(&self) -> Option<(Point, Point)> {
        match self.body.as_slice() {
            [head, neck, ..] => Some((*head, *neck)),
            _ => None,
        }
    }

    /// Whether every link has been placed
    pub fn is_complete(&self) -> bool {
        self.body.len() == self.segments + 1
    }

    /// Write the current body into an empty trail so it survives the first rebuild
    pub fn seed_trail(&self, trail: &mut Trail) {
        if !trail.is_empty() {
            return;
        }
        for &joint in &self.body {
            trail.push_oldest(joint, 0.0);
        }
    }

    /// Add one link; it appears once the trail is long enough
    pub fn grow(&mut self) {
        self.segments += 1;
    }

    /// Rebuild the body from the trail
    ///
    /// Returns the index from which the trail can be dropped: once every link
    /// is placed, samples more than two link lengths beyond the tail joint can
    /// never be reached by a future rebuild.
    pub fn rebuild(&mut self, trail: &Trail) -> Option<usize> {
        let path = trail.path();
        self.body.clear();

        let Some(&head) = path.front() else {
            return None;
        };
        self.body.push(head);
        let mut seg_head = head;

        for ix in 1..path.len() {
            let p = path[ix];

            if self.body.len() <= self.segments {
                // A sample exactly one link away is itself the next joint
                while distance(seg_head, p) >= self.seg_length {
                    let Some(joint) =
                        segment_intersect_circle((path[ix - 1], p), seg_head, self.seg_length)
                    else {
                        // Solver found nothing on this step; keep what was placed
                        return None;
                    };
                    seg_head = joint;
                    self.body.push(joint);
                    if self.body.len() > self.segments {
                        break;
                    }
                }
            } else if distance(seg_head, p) > 2.0 * self.seg_length {
                return Some(ix);
            }
        }

        None
    }

    /// Rebuild and drop trail history the body can no longer reach
    pub fn follow(&mut self, trail: &mut Trail) {
        if let Some(index) = self.rebuild(trail) {
            log::debug!("Trimming trail from {} to {} samples", trail.len(), index);
            trail.trim(index);
        }
    }
}
