//! Plane geometry for the snake body
//!
//! Every query has a defined "no intersection" outcome: degenerate input
//! (zero-length segments, parallel lines, a circle that misses) yields `None`.
//!
//! Parameter ranges are inclusive. A root up to [`PARAM_EPSILON`] outside
//! `[0, 1]` is clamped back onto the segment, so touching always counts.

use crate::Point;

/// Tolerance on segment parameters when deciding whether a root lies on the segment
pub const PARAM_EPSILON: f64 = 1e-9;

/// Below this, a squared length or determinant is treated as zero
const DEGENERATE_EPSILON: f64 = 1e-12;

/// A line segment between two points
pub type Segment = (Point, Point);

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance(p2)
}

/// Clamp a parameter into `[0, 1]` if it lies within tolerance of the range
#[inline]
fn on_segment(t: f64) -> Option<f64> {
    if (-PARAM_EPSILON..=1.0 + PARAM_EPSILON).contains(&t) {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Intersect a segment with a circle
///
/// The segment is parameterised as `t * p1 + (1 - t) * p2`, so `t = 0` is the
/// second endpoint. The smaller root is preferred: of two crossings, the one
/// closest to `p2` is returned. A tangent (zero discriminant) yields its single
/// point.
pub fn segment_intersect_circle(segment: Segment, center: Point, radius: f64) -> Option<Point> {
    let (p1, p2) = segment;
    let d = p1 - p2;
    let to_center = p2 - center;

    let a = d.length_squared();
    if a < DEGENERATE_EPSILON {
        return None;
    }
    let b = d.dot(to_center);
    let c = to_center.length_squared() - radius * radius;

    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t = on_segment((-b - root) / a).or_else(|| on_segment((-b + root) / a))?;

    Some(p1 * t + p2 * (1.0 - t))
}

/// Intersect two segments
///
/// Returns `None` for parallel (or degenerate) segments and when either
/// parameter falls outside its segment.
pub fn segment_intersect_segment(seg1: Segment, seg2: Segment) -> Option<Point> {
    let (p1, p2) = seg1;
    let (p3, p4) = seg2;

    let denom = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if denom.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / denom;
    let t = on_segment(t)?;

    let u = ((p1.x - p3.x) * (p1.y - p2.y) - (p1.y - p3.y) * (p1.x - p2.x)) / denom;
    on_segment(u)?;

    Some(p1 + (p2 - p1) * t)
}

/// Whether a segment comes within `radius` of `center`
///
/// True when the segment crosses or touches the circle, or lies inside it.
pub fn segment_within_radius(segment: Segment, center: Point, radius: f64) -> bool {
    distance(segment.0, center) <= radius
        || segment_intersect_circle(segment, center, radius).is_some()
}

/// Whether any part of a polyline comes within `radius` of `center`
///
/// A single-point path is tested as a point; an empty path never is.
pub fn path_within_radius(path: &[Point], center: Point, radius: f64) -> bool {
    match path {
        [] => false,
        [only] => distance(*only, center) <= radius,
        _ => path
            .windows(2)
            .any(|link| segment_within_radius((link[0], link[1]), center, radius)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(p(0.0, 0.0), p(3.0, 4.0)), 5.0);
        assert_eq!(distance(p(1.0, 1.0), p(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_circle_prefers_crossing_near_second_endpoint() {
        // Circle at (200, 0) crosses the x-axis at 150 and 250; only 150 is on the segment
        let hit = segment_intersect_circle((p(200.0, 0.0), p(0.0, 0.0)), p(200.0, 0.0), 50.0);
        assert_eq!(hit, Some(p(150.0, 0.0)));

        // Both crossings on the segment: the one nearer p2 wins
        let hit = segment_intersect_circle((p(-100.0, 0.0), p(100.0, 0.0)), p(0.0, 0.0), 50.0);
        assert_eq!(hit, Some(p(50.0, 0.0)));
    }

    #[test]
    fn test_circle_tangent_returns_one_point() {
        // Discriminant is exactly zero
        let hit = segment_intersect_circle((p(-10.0, 5.0), p(10.0, 5.0)), p(0.0, 0.0), 5.0);
        assert_eq!(hit, Some(p(0.0, 5.0)));
    }

    #[test]
    fn test_circle_miss() {
        assert!(
            segment_intersect_circle((p(-10.0, 6.0), p(10.0, 6.0)), p(0.0, 0.0), 5.0).is_none()
        );
        // Segment entirely inside the circle crosses nothing
        assert!(segment_intersect_circle((p(-1.0, 0.0), p(1.0, 0.0)), p(0.0, 0.0), 5.0).is_none());
        // Segment stops short of the circle
        assert!(segment_intersect_circle((p(20.0, 0.0), p(10.0, 0.0)), p(0.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn test_circle_degenerate_segment() {
        assert!(segment_intersect_circle((p(5.0, 0.0), p(5.0, 0.0)), p(0.0, 0.0), 5.0).is_none());
    }

    #[test]
    fn test_circle_endpoint_on_boundary_is_inclusive() {
        let hit = segment_intersect_circle((p(20.0, 0.0), p(5.0, 0.0)), p(0.0, 0.0), 5.0);
        assert_eq!(hit, Some(p(5.0, 0.0)));
    }

    #[test]
    fn test_segments_cross() {
        let hit =
            segment_intersect_segment((p(0.0, 0.0), p(10.0, 10.0)), (p(0.0, 10.0), p(10.0, 0.0)));
        assert_eq!(hit, Some(p(5.0, 5.0)));
    }

    #[test]
    fn test_segments_parallel_and_collinear() {
        assert!(
            segment_intersect_segment((p(0.0, 0.0), p(10.0, 0.0)), (p(0.0, 1.0), p(10.0, 1.0)))
                .is_none()
        );
        assert!(
            segment_intersect_segment((p(0.0, 0.0), p(10.0, 0.0)), (p(5.0, 0.0), p(15.0, 0.0)))
                .is_none()
        );
    }

    #[test]
    fn test_segments_out_of_range() {
        // Lines cross at (5, 5) but the first segment stops at (4, 4)
        assert!(
            segment_intersect_segment((p(0.0, 0.0), p(4.0, 4.0)), (p(0.0, 10.0), p(10.0, 0.0)))
                .is_none()
        );
    }

    #[test]
    fn test_segments_touching_endpoint() {
        let hit =
            segment_intersect_segment((p(0.0, 0.0), p(5.0, 5.0)), (p(0.0, 10.0), p(10.0, 0.0)));
        assert_eq!(hit, Some(p(5.0, 5.0)));
    }

    #[test]
    fn test_path_within_radius() {
        let path = [p(0.0, 0.0), p(100.0, 0.0)];
        assert!(path_within_radius(&path, p(50.0, 10.0), 10.0));
        assert!(!path_within_radius(&path, p(50.0, 10.5), 10.0));
        // Fully inside the circle
        assert!(path_within_radius(&path, p(50.0, 0.0), 500.0));
        assert!(path_within_radius(&[p(1.0, 1.0)], p(0.0, 0.0), 2.0));
        assert!(!path_within_radius(&[], p(0.0, 0.0), 2.0));
    }
}
