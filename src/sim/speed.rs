//! Smoothed speedometer and the rising speed floor

use serde::{Deserialize, Serialize};

use super::trail::Trail;

/// How raw trail speed is blended into the displayed speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Smoothing {
    /// Constant blend factor per sample
    Fixed { alpha: f64 },
    /// Blend factor derived from the sample interval: `1 - exp(-dt / tau)`
    TimeConstant { tau_secs: f64 },
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::TimeConstant {
            tau_secs: crate::consts::SPEED_TAU_SECS,
        }
    }
}

impl Smoothing {
    /// Blend factor for a sample `dt_secs` after the previous one
    pub fn alpha(&self, dt_secs: f64) -> f64 {
        match *self {
            Smoothing::Fixed { alpha } => alpha.clamp(0.0, 1.0),
            Smoothing::TimeConstant { tau_secs } => {
                if tau_secs <= 0.0 {
                    1.0
                } else {
                    1.0 - (-dt_secs.max(0.0) / tau_secs).exp()
                }
            }
        }
    }
}

/// Current speed against the speed the player must keep
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTracker {
    /// Smoothed speed (px/ms)
    pub speed: f64,
    /// Latest unsmoothed measurement (px/ms)
    pub raw_speed: f64,
    /// Minimum speed before the round is lost (px/ms)
    pub speed_limit: f64,
    smoothing: Smoothing,
    window: usize,
}

impl SpeedTracker {
    pub fn new(smoothing: Smoothing, window: usize) -> Self {
        Self {
            speed: 0.0,
            raw_speed: 0.0,
            speed_limit: 0.0,
            smoothing,
            window: window.max(1),
        }
    }

    /// Measure the trail and fold it into the smoothed speed
    pub fn update(&mut self, trail: &Trail) {
        self.raw_speed = trail.compute_speed(self.window);
        let alpha = self.smoothing.alpha(trail.mean_step_secs(self.window));
        self.speed = alpha * self.raw_speed + (1.0 - alpha) * self.speed;
    }

    /// Raise the floor after a pickup, never above `max_speed`
    pub fn raise_limit(&mut self, increment: f64, max_speed: f64) {
        self.speed_limit = (self.speed_limit + increment).min(max_speed);
    }

    pub fn too_slow(&self) -> bool {
        self.speed < self.speed_limit
    }

    pub fn reset(&mut self) {
        self.speed = 0.0;
        self.raw_speed = 0.0;
        self.speed_limit = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    #[test]
    fn test_time_constant_alpha() {
        let smoothing = Smoothing::TimeConstant { tau_secs: 0.5 };
        assert_eq!(smoothing.alpha(0.0), 0.0);
        assert!((smoothing.alpha(0.5) - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
        // Longer gaps trust the new sample more
        assert!(smoothing.alpha(0.1) < smoothing.alpha(0.2));
    }

    #[test]
    fn test_fixed_alpha_is_clamped() {
        assert_eq!(Smoothing::Fixed { alpha: 0.1 }.alpha(123.0), 0.1);
        assert_eq!(Smoothing::Fixed { alpha: 3.0 }.alpha(0.0), 1.0);
    }

    #[test]
    fn test_update_blends_towards_raw() {
        let mut trail = Trail::new();
        trail.record(Point::new(0.0, 0.0), 0.0);
        trail.record(Point::new(20.0, 0.0), 10.0);

        let mut tracker = SpeedTracker::new(Smoothing::Fixed { alpha: 0.5 }, 1);
        tracker.update(&trail);
        assert_eq!(tracker.raw_speed, 2.0);
        assert_eq!(tracker.speed, 1.0);
        tracker.update(&trail);
        assert_eq!(tracker.speed, 1.5);
    }

    #[test]
    fn test_update_single_sample_stays_finite() {
        let mut trail = Trail::new();
        trail.record(Point::new(5.0, 5.0), 100.0);
        let mut tracker = SpeedTracker::new(Smoothing::default(), 6);
        tracker.update(&trail);
        assert_eq!(tracker.speed, 0.0);
        assert!(!tracker.too_slow());
    }

    #[test]
    fn test_raise_limit_caps_at_max() {
        let mut tracker = SpeedTracker::new(Smoothing::default(), 1);
        tracker.raise_limit(0.3, 0.5);
        assert_eq!(tracker.speed_limit, 0.3);
        tracker.raise_limit(0.3, 0.5);
        assert_eq!(tracker.speed_limit, 0.5);
        assert!(tracker.too_slow());

        tracker.reset();
        assert_eq!(tracker.speed_limit, 0.0);
        assert!(!tracker.too_slow());
    }
}
