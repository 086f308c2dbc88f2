//! Raw pointer history
//!
//! Samples are stored newest first. `path[i]` was sampled at `time_stamps[i]`
//! (milliseconds), and the two queues always have the same length.

use std::collections::VecDeque;

use super::geometry::distance;
use crate::Point;

/// Timestamped pointer samples, most recent first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    path: VecDeque<Point>,
    time_stamps: VecDeque<f64>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a pointer sample
    pub fn record(&mut self, point: Point, timestamp: f64) {
        self.path.push_front(point);
        self.time_stamps.push_front(timestamp);
    }

    /// Re-sample the head in place (pointer idle for a frame)
    ///
    /// Lets the measured speed fall towards zero while no input arrives. The
    /// first idle frame repeats the head; later ones only move that repeat's
    /// timestamp, so an idle pointer never grows the history.
    pub fn record_idle(&mut self, timestamp: f64) {
        let Some(&head) = self.path.front() else {
            return;
        };
        if self.path.get(1) == Some(&head) {
            if let Some(last) = self.time_stamps.front_mut() {
                *last = timestamp;
            }
        } else {
            self.record(head, timestamp);
        }
    }

    /// Append a sample at the old end of the history
    pub(crate) fn push_oldest(&mut self, point: Point, timestamp: f64) {
        self.path.push_back(point);
        self.time_stamps.push_back(timestamp);
    }

    /// Drop every sample at and beyond `index`
    pub fn trim(&mut self, index: usize) {
        self.path.truncate(index);
        self.time_stamps.truncate(index);
    }

    pub fn clear(&mut self) {
        self.path.clear();
        self.time_stamps.clear();
    }

    pub fn path(&self) -> &VecDeque<Point> {
        &self.path
    }

    pub fn time_stamps(&self) -> &VecDeque<f64> {
        &self.time_stamps
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Freshest sample
    pub fn head(&self) -> Option<Point> {
        self.path.front().copied()
    }

    /// Timestamp of the freshest sample
    pub fn last_time(&self) -> Option<f64> {
        self.time_stamps.front().copied()
    }

    /// The most recent raw movement, newest point first
    pub fn head_segment(&self) -> Option<(Point, Point)> {
        Some((*self.path.front()?, *self.path.get(1)?))
    }

    /// Steps actually available for a window of `window` steps
    fn clamp_window(&self, window: usize) -> usize {
        window.min(self.path.len().saturating_sub(1))
    }

    /// Average speed (px/ms) over the most recent `window` steps
    ///
    /// Returns 0 with fewer than two samples, or when no distance or no time
    /// elapsed across the window.
    pub fn compute_speed(&self, window: usize) -> f64 {
        let window = self.clamp_window(window);
        if window == 0 {
            return 0.0;
        }

        let travelled: f64 = self
            .path
            .iter()
            .zip(self.path.iter().skip(1))
            .take(window)
            .map(|(&newer, &older)| distance(newer, older))
            .sum();
        let elapsed = self.time_stamps[0] - self.time_stamps[window];

        if travelled == 0.0 || elapsed <= 0.0 {
            0.0
        } else {
            travelled / elapsed
        }
    }

    /// Mean time between samples (seconds) over the most recent `window` steps
    pub fn mean_step_secs(&self, window: usize) -> f64 {
        let window = self.clamp_window(window);
        if window == 0 {
            return 0.0;
        }
        let elapsed = self.time_stamps[0] - self.time_stamps[window];
        (elapsed / 1000.0 / window as f64).max(0.0)
    }
}
