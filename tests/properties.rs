//! Property tests for body reconstruction, collisions and pellet placement

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use speed_snek::sim::{
    Bounds, Item, Placement, Smoothing, Snake, SpeedTracker, Trail, distance,
    path_within_radius, self_collision,
};
use speed_snek::{Point, Settings};

fn point() -> impl Strategy<Value = Point> {
    (0.0..800.0f64, 0.0..600.0f64).prop_map(|(x, y)| Point::new(x, y))
}

/// Oldest sample first, as they would arrive from the pointer
fn samples() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec(point(), 1..60)
}

fn trail_from(samples: &[Point]) -> Trail {
    let mut trail = Trail::new();
    for (i, &p) in samples.iter().enumerate() {
        trail.record(p, i as f64 * 16.0);
    }
    trail
}

fn snake(segments: usize) -> Snake {
    let settings = Settings {
        initial_segments: segments,
        ..Settings::default()
    };
    Snake::new(Point::ZERO, &settings)
}

proptest! {
    #[test]
    fn links_keep_their_length(samples in samples(), segments in 1usize..12) {
        let trail = trail_from(&samples);
        let mut snake = snake(segments);
        snake.rebuild(&trail);

        prop_assert!(snake.body().len() <= segments + 1);
        for link in snake.body().windows(2) {
            let len = distance(link[0], link[1]);
            prop_assert!((len - snake.seg_length).abs() < 1e-5, "link length {}", len);
        }
    }

    #[test]
    fn head_is_latest_sample(samples in samples()) {
        let trail = trail_from(&samples);
        let mut snake = snake(4);
        snake.rebuild(&trail);
        prop_assert_eq!(snake.head(), samples.last().copied());
    }

    #[test]
    fn follow_is_idempotent(samples in samples(), segments in 1usize..8) {
        let mut trail = trail_from(&samples);
        let mut snake = snake(segments);
        snake.follow(&mut trail);
        let body = snake.body().to_vec();
        let len = trail.len();

        snake.follow(&mut trail);
        prop_assert_eq!(snake.body(), body.as_slice());
        prop_assert_eq!(trail.len(), len);
    }

    #[test]
    fn trimming_never_changes_the_body(samples in samples(), segments in 1usize..8) {
        let mut trail = trail_from(&samples);
        let mut full = snake(segments);
        full.rebuild(&trail);

        let mut trimmed = snake(segments);
        trimmed.follow(&mut trail);
        // Rebuilding from the trimmed history gives the same body
        trimmed.rebuild(&trail);
        prop_assert_eq!(trimmed.body(), full.body());
    }

    #[test]
    fn straight_runs_never_self_collide(
        start in point(),
        heading in 0usize..4,
        steps in 2usize..80,
        step in 1.0..40.0f64,
    ) {
        let dir = [Point::X, Point::Y, Point::NEG_X, Point::NEG_Y][heading];
        let samples: Vec<Point> = (0..steps).map(|i| start + dir * (i as f64 * step)).collect();
        let trail = trail_from(&samples);
        let mut snake = snake(10);
        snake.rebuild(&trail);
        prop_assert_eq!(self_collision(snake.body()), None);
    }

    #[test]
    fn clear_placement_keeps_its_distance(seed in any::<u64>(), samples in samples()) {
        let bounds = Bounds::new(800.0, 600.0);
        let buffer = 30.0;
        let trail = trail_from(&samples);
        let mut snake = snake(4);
        snake.rebuild(&trail);

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut item = Item::new(Point::ZERO, 15.0);
        let placement = item.place(&mut rng, &bounds, snake.body(), buffer, 500);

        match placement {
            Placement::Clear => {
                let clearance = item.radius + buffer;
                prop_assert!(!path_within_radius(snake.body(), item.location, clearance));
            }
            Placement::Relaxed => {
                prop_assert!(!path_within_radius(snake.body(), item.location, item.radius));
            }
            Placement::Fallback => prop_assert_eq!(item.location, bounds.center()),
        }
        if placement != Placement::Fallback {
            prop_assert!(item.location.x >= buffer && item.location.x < bounds.width - buffer);
            prop_assert!(item.location.y >= buffer && item.location.y < bounds.height - buffer);
        }
    }

    #[test]
    fn growth_adds_one_link(grows in 1usize..10) {
        let mut snake = snake(4);
        for _ in 0..grows {
            snake.grow();
        }
        prop_assert_eq!(snake.segments, 4 + grows);
        prop_assert!(!snake.is_complete());

        // A long enough straight trail completes the longer body
        let samples: Vec<Point> = (0..200).map(|i| Point::new(i as f64 * 10.0, 0.0)).collect();
        snake.rebuild(&trail_from(&samples));
        prop_assert!(snake.is_complete());
        prop_assert_eq!(snake.body().len(), 5 + grows);
    }

    #[test]
    fn speed_limit_is_capped(pickups in 0usize..400, increment in 0.0..0.5f64) {
        let mut tracker = SpeedTracker::new(Smoothing::default(), 1);
        for _ in 0..pickups {
            tracker.raise_limit(increment, 5.0);
        }
        prop_assert!(tracker.speed_limit <= 5.0);
        prop_assert!(tracker.speed_limit >= 0.0);
    }
}
