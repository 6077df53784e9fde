use probescope_common::{EPSILON, Real};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }
}

/// The axis-aligned rectangle `[0, width] x [0, height]` that probes are clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: Real,
    pub height: Real,
}

impl Bounds {
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// A single ray leaving an emitter.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probe {
    /// Direction in radians, measured from the positive x axis.
    pub angle: Real,
    pub length: Real,
}

/// How far a probe may travel when testing it against a collector.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeReach {
    /// A probe stops at its own length.
    #[default]
    Bounded,
    /// A probe is treated as infinitely long.
    Unbounded,
}

/// Smallest strictly positive travel distance from `from` to either of the
/// two boundaries at `low` and `high`, moving with component `direction`.
fn nearest_exit(from: Real, direction: Real, low: Real, high: Real) -> Option<Real> {
    if direction.abs() < EPSILON {
        return None;
    }
    [(high - from) / direction, (low - from) / direction]
        .into_iter()
        .filter(|t| *t > 0.0)
        .reduce(Real::min)
}

/// Returns the distance a probe leaving `origin` at `angle` may travel before it
/// leaves `bounds`.
pub fn bounding_ray_length(origin: Point, angle: Real, bounds: Bounds) -> Real {
    let (dy, dx) = angle.sin_cos();
    let mut length = 2.0 * bounds.width.max(bounds.height);

    if let Some(t) = nearest_exit(origin.x, dx, 0.0, bounds.width) {
        length = length.min(t);
    }
    if let Some(t) = nearest_exit(origin.y, dy, 0.0, bounds.height) {
        length = length.min(t);
    }
    length.max(0.0)
}

/// Returns the y coordinate at which the probe crosses the vertical line at `line_x`.
///
/// Only probes travelling rightwards count, and only against a line strictly to the
/// right of the origin. A probe that ends before reaching the line misses it.
pub fn intersect_vertical_line(
    origin: Point,
    angle: Real,
    probe_length: Real,
    line_x: Real,
) -> Option<Real> {
    let (dy, dx) = angle.sin_cos();
    if dx < EPSILON || line_x <= origin.x {
        return None;
    }
    let t = (line_x - origin.x) / dx;
    if t < 0.0 || t > probe_length {
        return None;
    }
    Some(origin.y + dy * t)
}

impl Probe {
    pub fn intersect(&self, origin: Point, line_x: Real, reach: ProbeReach) -> Option<Real> {
        let length = match reach {
            ProbeReach::Bounded => self.length,
            ProbeReach::Unbounded => Real::INFINITY,
        };
        intersect_vertical_line(origin, self.angle, length, line_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const BOUNDS: Bounds = Bounds {
        width: 100.0,
        height: 50.0,
    };

    #[test]
    fn ray_length_to_each_edge() {
        let origin = Point::new(20.0, 10.0);
        assert_approx_eq!(bounding_ray_length(origin, 0.0, BOUNDS), 80.0);
        assert_approx_eq!(bounding_ray_length(origin, PI, BOUNDS), 20.0);
        assert_approx_eq!(bounding_ray_length(origin, FRAC_PI_2, BOUNDS), 40.0);
        assert_approx_eq!(bounding_ray_length(origin, -FRAC_PI_2, BOUNDS), 10.0);
    }

    #[test]
    fn ray_length_diagonal_hits_nearest_edge() {
        let origin = Point::new(20.0, 10.0);
        // Leaves through the top edge at y = 50 before reaching x = 100.
        assert_approx_eq!(
            bounding_ray_length(origin, FRAC_PI_4, BOUNDS),
            40.0 * 2.0_f64.sqrt()
        );
    }

    #[test]
    fn ray_length_from_corner_is_finite() {
        let length = bounding_ray_length(Point::new(0.0, 0.0), PI, BOUNDS);
        assert!(length.is_finite());
        assert!(length >= 0.0);
    }

    #[test]
    fn ray_length_is_never_longer_than_candidate() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let origin = Point::new(
                rng.random_range(0.0..BOUNDS.width),
                rng.random_range(0.0..BOUNDS.height),
            );
            let angle = rng.random_range(-PI..PI);
            let length = bounding_ray_length(origin, angle, BOUNDS);
            assert!((0.0..=200.0).contains(&length));
        }
    }

    #[test]
    fn horizontal_probe_hits_line() {
        let hit = intersect_vertical_line(Point::new(0.0, 5.0), 0.0, 100.0, 50.0);
        assert_eq!(hit, Some(5.0));
    }

    #[test]
    fn angled_probe_hits_line() {
        let hit = intersect_vertical_line(Point::new(0.0, 0.0), FRAC_PI_4, 100.0, 10.0);
        assert_approx_eq!(hit.unwrap(), 10.0);
    }

    #[test]
    fn short_probe_misses_line() {
        assert_eq!(
            intersect_vertical_line(Point::new(0.0, 0.0), 0.0, 49.0, 50.0),
            None
        );
    }

    #[test]
    fn vertical_probe_is_parallel() {
        assert_eq!(
            intersect_vertical_line(Point::new(0.0, 0.0), FRAC_PI_2, 1000.0, 50.0),
            None
        );
    }

    #[test]
    fn line_at_or_behind_origin_never_hit() {
        let origin = Point::new(50.0, 0.0);
        assert_eq!(intersect_vertical_line(origin, 0.0, 1000.0, 50.0), None);
        assert_eq!(intersect_vertical_line(origin, 0.0, 1000.0, 10.0), None);
        assert_eq!(intersect_vertical_line(origin, PI, 1000.0, 10.0), None);
    }

    #[test]
    fn leftward_probes_never_hit_line_to_the_right() {
        let mut rng = StdRng::seed_from_u64(11);
        let origin = Point::new(0.0, 0.0);
        for _ in 0..1000 {
            // cos(angle) <= 0 on this range
            let angle = rng.random_range(FRAC_PI_2..(3.0 * FRAC_PI_2));
            let line_x = rng.random_range(0.001..1000.0);
            assert_eq!(
                intersect_vertical_line(origin, angle, Real::INFINITY, line_x),
                None
            );
        }
    }

    #[test]
    fn unbounded_reach_ignores_length() {
        let probe = Probe {
            angle: 0.0,
            length: 1.0,
        };
        let origin = Point::new(0.0, 3.0);
        assert_eq!(probe.intersect(origin, 50.0, ProbeReach::Bounded), None);
        assert_eq!(
            probe.intersect(origin, 50.0, ProbeReach::Unbounded),
            Some(3.0)
        );
    }
}
