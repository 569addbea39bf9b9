//! Obstacle extraction for the path planner.
//!
//! A scan list is a sequence of range readings where the reading at index
//! `i` was taken at a bearing of `i` degrees from the scan origin. Close
//! returns become obstacles; on top of those, every plan gets a handful of
//! random obstacles so the planner always has something to route around.

use rand::Rng;
use rover_types::Point;
use rover_world::geometry::offset_polar;

use crate::config::ScanConfig;

/// Convert close scan returns around `origin` into obstacle points.
///
/// Only the first `max_entries` readings are looked at, and of those only
/// the even indices. A reading strictly below `obstacle_range` becomes a
/// point at that range along its bearing.
pub fn obstacles_from_scan(origin: Point, scan: &[f64], config: &ScanConfig) -> Vec<Point> {
    scan.iter()
        .take(config.max_entries)
        .zip(0_u32..)
        .step_by(2)
        .filter(|&(&range, _)| range < config.obstacle_range)
        .map(|(&range, bearing)| offset_polar(origin, range, f64::from(bearing)))
        .collect()
}

/// Scatter `random_obstacles` points uniformly over the configured square.
pub fn scatter_obstacles<R: Rng + ?Sized>(rng: &mut R, config: &ScanConfig) -> Vec<Point> {
    (0..config.random_obstacles)
        .map(|_| Point::new(coordinate(rng, config), coordinate(rng, config)))
        .collect()
}

fn coordinate<R: Rng + ?Sized>(rng: &mut R, config: &ScanConfig) -> f64 {
    if config.random_max > config.random_min {
        rng.random_range(config.random_min..=config.random_max)
    } else {
        config.random_min
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn only_even_close_readings_count() {
        let config = ScanConfig::default();
        // Index 0 close, 1 close but odd, 2 far, 4 close.
        let scan = [1.0, 1.0, 5.0, 0.5, 2.0];
        let obstacles = obstacles_from_scan(Point::new(0.0, 0.0), &scan, &config);
        assert_eq!(obstacles.len(), 2);

        let first = obstacles.first().copied().unwrap_or_default();
        assert!(close(first.x, 1.0) && close(first.y, 0.0));

        let second = obstacles.get(1).copied().unwrap_or_default();
        let expected = offset_polar(Point::new(0.0, 0.0), 2.0, 4.0);
        assert!(close(second.x, expected.x) && close(second.y, expected.y));
    }

    #[test]
    fn range_threshold_is_strict() {
        let config = ScanConfig::default();
        let obstacles = obstacles_from_scan(Point::new(0.0, 0.0), &[3.0], &config);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn readings_past_max_entries_are_ignored() {
        let config = ScanConfig::default();
        let scan = vec![0.5; 100];
        let obstacles = obstacles_from_scan(Point::new(2.0, 3.0), &scan, &config);
        // Even indices 0, 2, ..., 18.
        assert_eq!(obstacles.len(), 10);
    }

    #[test]
    fn empty_scan_yields_nothing() {
        let obstacles = obstacles_from_scan(Point::default(), &[], &ScanConfig::default());
        assert!(obstacles.is_empty());
    }

    #[test]
    fn scatter_stays_in_square() {
        let config = ScanConfig::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let points = scatter_obstacles(&mut rng, &config);
        assert_eq!(points.len(), 5);
        for p in points {
            assert!((1.0..=9.0).contains(&p.x));
            assert!((1.0..=9.0).contains(&p.y));
        }
    }

    #[test]
    fn scatter_can_be_disabled() {
        let config = ScanConfig {
            random_obstacles: 0,
            ..ScanConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(scatter_obstacles(&mut rng, &config).is_empty());
    }
}
