//! Goal-biased rapidly-exploring random tree (RRT) path planner.
//!
//! The planner grows a tree from the start point by repeatedly sampling a
//! target, extending the nearest tree node one fixed step toward it, and
//! discarding any extension that lands too close to an obstacle. With a
//! small probability the goal itself is used as the sample, which pulls the
//! tree toward the goal without giving up exploration.
//!
//! # Path reconstruction
//!
//! Every node remembers the index of the node it was grown from. Once a
//! node lands within the goal tolerance, the path is the chain of parents
//! from that node back to the root, reversed. Consecutive waypoints are
//! therefore always exactly one step apart.
//!
//! # Randomness
//!
//! The planner owns no random state. Callers pass any [`rand::Rng`], so
//! tests can plan with a seeded generator and get the same tree every time.

use rand::Rng;
use rover_types::Point;
use serde::Deserialize;
use tracing::debug;

use crate::geometry::step_toward;

/// Tunable parameters of the planner.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlannerConfig {
    /// Maximum number of sampling rounds before giving up.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Probability in `[0, 1]` of sampling the goal directly.
    #[serde(default = "default_goal_bias")]
    pub goal_bias: f64,

    /// Length of each tree extension.
    #[serde(default = "default_step_size")]
    pub step_size: f64,

    /// Extensions strictly closer than this to any obstacle are rejected.
    #[serde(default = "default_collision_radius")]
    pub collision_radius: f64,

    /// A node strictly closer than this to the goal ends the search.
    #[serde(default = "default_goal_tolerance")]
    pub goal_tolerance: f64,

    /// Lower bound of the square sampling region on both axes.
    #[serde(default)]
    pub sample_min: f64,

    /// Upper bound of the square sampling region on both axes.
    #[serde(default = "default_sample_max")]
    pub sample_max: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            goal_bias: default_goal_bias(),
            step_size: default_step_size(),
            collision_radius: default_collision_radius(),
            goal_tolerance: default_goal_tolerance(),
            sample_min: 0.0,
            sample_max: default_sample_max(),
        }
    }
}

const fn default_max_iterations() -> u32 {
    1000
}

const fn default_goal_bias() -> f64 {
    0.1
}

const fn default_step_size() -> f64 {
    0.5
}

const fn default_collision_radius() -> f64 {
    0.5
}

const fn default_goal_tolerance() -> f64 {
    0.5
}

const fn default_sample_max() -> f64 {
    10.0
}

/// A node of the search tree.
#[derive(Debug, Clone, Copy)]
struct TreeNode {
    point: Point,
    /// Index of the node this one was grown from; `None` for the root.
    parent: Option<usize>,
}

/// Single-query RRT planner.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    config: PlannerConfig,
}

impl PathPlanner {
    /// Create a planner with the given parameters.
    pub const fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The planner's parameters.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a route from `start` to `goal` around `obstacles`.
    ///
    /// Returns the waypoints from `start` to the first node within the goal
    /// tolerance, or an empty vector if no such node was reached within
    /// `max_iterations` rounds. An unreachable goal is not an error.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        start: Point,
        goal: Point,
        obstacles: &[Point],
        rng: &mut R,
    ) -> Vec<Point> {
        if start.distance_to(goal) < self.config.goal_tolerance {
            debug!("Start already within goal tolerance");
            return vec![start];
        }

        let mut tree = vec![TreeNode {
            point: start,
            parent: None,
        }];

        for iteration in 0..self.config.max_iterations {
            let sample = self.sample(goal, rng);
            let nearest_idx = nearest_index(&tree, sample);
            let Some(nearest) = tree.get(nearest_idx) else {
                continue;
            };

            let candidate = step_toward(nearest.point, sample, self.config.step_size);
            if self.collides(candidate, obstacles) {
                continue;
            }

            tree.push(TreeNode {
                point: candidate,
                parent: Some(nearest_idx),
            });

            if candidate.distance_to(goal) < self.config.goal_tolerance {
                let path = trace_back(&tree, tree.len().saturating_sub(1));
                debug!(
                    iterations = iteration.saturating_add(1),
                    tree_size = tree.len(),
                    waypoints = path.len(),
                    "Path found"
                );
                return path;
            }
        }

        debug!(
            iterations = self.config.max_iterations,
            tree_size = tree.len(),
            "No path found"
        );
        Vec::new()
    }

    /// Draw the next sample: the goal with probability `goal_bias`,
    /// otherwise a uniform point in the sampling square.
    fn sample<R: Rng + ?Sized>(&self, goal: Point, rng: &mut R) -> Point {
        if rng.random::<f64>() < self.config.goal_bias {
            return goal;
        }
        Point::new(self.sample_coordinate(rng), self.sample_coordinate(rng))
    }

    fn sample_coordinate<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let (min, max) = (self.config.sample_min, self.config.sample_max);
        if max > min {
            rng.random_range(min..max)
        } else {
            min
        }
    }

    fn collides(&self, candidate: Point, obstacles: &[Point]) -> bool {
        obstacles
            .iter()
            .any(|&obstacle| candidate.distance_to(obstacle) < self.config.collision_radius)
    }
}

/// Index of the tree node closest to `target`. Ties go to the lowest index.
fn nearest_index(tree: &[TreeNode], target: Point) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, node) in tree.iter().enumerate() {
        let dist = node.point.distance_to(target);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}

/// Follow parent links from `leaf` to the root and return the chain
/// root-first.
fn trace_back(tree: &[TreeNode], leaf: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut cursor = Some(leaf);
    while let Some(idx) = cursor {
        let Some(node) = tree.get(idx) else {
            break;
        };
        path.push(node.point);
        cursor = node.parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn planner() -> PathPlanner {
        PathPlanner::default()
    }

    fn assert_well_formed(path: &[Point], start: Point, goal: Point, obstacles: &[Point]) {
        let config = PlannerConfig::default();
        assert_eq!(path.first().copied(), Some(start));
        let last = path.last().copied().unwrap_or(start);
        assert!(last.distance_to(goal) < config.goal_tolerance);
        for pair in path.windows(2) {
            if let [a, b] = pair {
                assert!((a.distance_to(*b) - config.step_size).abs() < EPSILON);
            }
        }
        for waypoint in path.iter().skip(1) {
            for obstacle in obstacles {
                assert!(waypoint.distance_to(*obstacle) >= config.collision_radius);
            }
        }
    }

    #[test]
    fn start_at_goal_returns_start() {
        let mut rng = SmallRng::seed_from_u64(42);
        let origin = Point::new(0.0, 0.0);
        let path = planner().plan(origin, origin, &[], &mut rng);
        assert_eq!(path, vec![origin]);
    }

    #[test]
    fn open_field_path_is_connected_chain() {
        let mut rng = SmallRng::seed_from_u64(42);
        let start = Point::new(1.0, 1.0);
        let goal = Point::new(8.0, 8.0);
        let path = planner().plan(start, goal, &[], &mut rng);
        assert!(!path.is_empty());
        // A straight line needs at least 19 steps of 0.5 to cover ~9.9.
        assert!(path.len() >= 20);
        assert_well_formed(&path, start, goal, &[]);
    }

    #[test]
    fn path_avoids_obstacles() {
        let mut rng = SmallRng::seed_from_u64(7);
        let start = Point::new(1.0, 5.0);
        let goal = Point::new(9.0, 5.0);
        // A partial wall across the direct line; the 0.6 gaps are too
        // narrow to pass through.
        let obstacles: Vec<Point> = (0_u8..5)
            .map(|i| Point::new(5.0, 3.8 + f64::from(i) * 0.6))
            .collect();
        let path = planner().plan(start, goal, &obstacles, &mut rng);
        assert!(!path.is_empty());
        assert_well_formed(&path, start, goal, &obstacles);
    }

    #[test]
    fn obstacle_on_goal_yields_empty_path() {
        let mut rng = SmallRng::seed_from_u64(42);
        let start = Point::new(1.0, 1.0);
        let goal = Point::new(6.0, 6.0);
        let path = planner().plan(start, goal, &[goal], &mut rng);
        assert!(path.is_empty());
    }

    #[test]
    fn zero_iterations_finds_nothing() {
        let mut rng = SmallRng::seed_from_u64(42);
        let planner = PathPlanner::new(PlannerConfig {
            max_iterations: 0,
            ..PlannerConfig::default()
        });
        let path = planner.plan(Point::new(1.0, 1.0), Point::new(8.0, 8.0), &[], &mut rng);
        assert!(path.is_empty());
    }

    #[test]
    fn same_seed_same_path() {
        let start = Point::new(2.0, 3.0);
        let goal = Point::new(5.0, 5.0);
        let mut a = SmallRng::seed_from_u64(99);
        let mut b = SmallRng::seed_from_u64(99);
        assert_eq!(
            planner().plan(start, goal, &[], &mut a),
            planner().plan(start, goal, &[], &mut b)
        );
    }

    #[test]
    fn full_goal_bias_walks_straight() {
        let mut rng = SmallRng::seed_from_u64(1);
        let planner = PathPlanner::new(PlannerConfig {
            goal_bias: 1.0,
            ..PlannerConfig::default()
        });
        let start = Point::new(0.0, 0.0);
        let goal = Point::new(0.0, 5.2);
        let path = planner.plan(start, goal, &[], &mut rng);
        // Ten steps of 0.5 leave 0.2 to the goal; nine would leave 0.7.
        assert_eq!(path.len(), 11);
        assert_well_formed(&path, start, goal, &[]);
    }

    #[test]
    fn nearest_prefers_lowest_index_on_tie() {
        let tree = [
            TreeNode {
                point: Point::new(1.0, 0.0),
                parent: None,
            },
            TreeNode {
                point: Point::new(-1.0, 0.0),
                parent: Some(0),
            },
        ];
        assert_eq!(nearest_index(&tree, Point::new(0.0, 0.0)), 0);
        assert_eq!(nearest_index(&tree, Point::new(-2.0, 0.0)), 1);
    }

    #[test]
    fn degenerate_sampling_square_does_not_panic() {
        let mut rng = SmallRng::seed_from_u64(3);
        let planner = PathPlanner::new(PlannerConfig {
            sample_min: 4.0,
            sample_max: 4.0,
            max_iterations: 50,
            ..PlannerConfig::default()
        });
        let _ = planner.plan(Point::new(0.0, 0.0), Point::new(9.0, 9.0), &[], &mut rng);
    }
}
