//! The simulation facade.
//!
//! [`SimulationWorld`] composes the rover, survivor registry, session
//! store, path planner, random source, and clock behind the operations the
//! HTTP layer exposes. It is created once at startup and shared by every
//! session; callers serialize access (the API wraps it in a mutex) so each
//! operation, battery tick included, runs atomically.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rover_types::{
    CommandOutcome, Direction, DisasterFeed, FleetStatus, PathRequest, PlannedRoute, Point,
    RoverSnapshot, SensorReport, SessionId,
};
use rover_world::{PathPlanner, SurvivorRegistry};
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::config::SimulationConfig;
use crate::feeds;
use crate::rover::Rover;
use crate::scan::{obstacles_from_scan, scatter_obstacles};
use crate::sensors::sample_environment;
use crate::session::SessionStore;

/// The whole mutable state of the backend.
#[derive(Debug)]
pub struct SimulationWorld {
    config: SimulationConfig,
    rover: Rover,
    survivors: SurvivorRegistry,
    sessions: SessionStore,
    planner: PathPlanner,
    rng: StdRng,
    clock: Arc<dyn Clock>,
}

impl SimulationWorld {
    /// Build a world running on the system clock.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a world running on the given clock.
    ///
    /// With `world.seed` set, every random draw (planner sampling, random
    /// obstacles, sensor jitter) is reproducible.
    pub fn with_clock(config: SimulationConfig, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let rng = config
            .world
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let rover = Rover::new(config.rover.clone(), config.battery.clone(), now);
        let survivors = SurvivorRegistry::seeded(config.world.detection_radius);
        let planner = PathPlanner::new(config.planner.clone());

        info!(
            seed = ?config.world.seed,
            survivors = survivors.len(),
            detection_radius = survivors.detection_radius(),
            "Simulation world initialized"
        );

        Self {
            config,
            rover,
            survivors,
            sessions: SessionStore::new(),
            planner,
            rng,
            clock,
        }
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Reset the world and issue a new session token. Every earlier token
    /// stops working.
    pub fn start_session(&mut self) -> SessionId {
        self.reset();
        self.sessions.create(self.clock.now())
    }

    /// Whether `id` is a known session; refreshes its activity time.
    pub fn check_session(&mut self, id: &SessionId) -> bool {
        let now = self.clock.now();
        self.sessions.check(id, now)
    }

    /// Number of sessions issued since the last reset.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Put the rover back in its start pose with the start battery, forget
    /// every survivor detection, and revoke every issued session.
    pub fn reset(&mut self) {
        self.rover.reset(self.clock.now());
        self.survivors.clear_detections();
        let revoked = self.sessions.clear();
        info!(revoked_sessions = revoked, "Simulation reset");
    }

    // -----------------------------------------------------------------------
    // Rover
    // -----------------------------------------------------------------------

    /// Tick the battery, drain the status-read cost, and snapshot the rover.
    pub fn rover_status(&mut self) -> RoverSnapshot {
        self.rover.read_status(self.clock.now())
    }

    /// Current rover state with no tick and no drain.
    pub const fn rover_snapshot(&self) -> RoverSnapshot {
        self.rover.snapshot()
    }

    /// Take a sensor reading: drains the sensor cost, runs survivor
    /// detection at the rover's position, and reports every survivor
    /// detected so far.
    pub fn sensor_data(&mut self) -> SensorReport {
        let battery_level = self.rover.read_sensors(self.clock.now());
        self.survivors.survivors_in_range(self.rover.position());
        SensorReport {
            readings: sample_environment(&mut self.rng),
            battery_level,
            survivors: self.survivors.all_detected(),
        }
    }

    /// Drive the rover.
    pub fn move_rover(&mut self, direction: Direction) -> CommandOutcome {
        self.rover.try_move(direction, self.clock.now())
    }

    /// Stop the rover.
    pub fn stop_rover(&mut self) -> CommandOutcome {
        self.rover.try_stop(self.clock.now())
    }

    // -----------------------------------------------------------------------
    // Planning
    // -----------------------------------------------------------------------

    /// Plan a route for `request`.
    ///
    /// Missing start coordinates default one by one to the rover's current
    /// coordinates and a missing goal to the configured default goal.
    /// Obstacles are the close scan returns plus the random scatter. Does
    /// not touch the battery.
    pub fn plan_path(&mut self, request: &PathRequest) -> PlannedRoute {
        let here = self.rover.position();
        let scan_config = &self.config.scan;
        let start = Point::new(
            request.start_x.unwrap_or(here.x),
            request.start_y.unwrap_or(here.y),
        );
        let goal = Point::new(
            request.goal_x.unwrap_or(scan_config.default_goal_x),
            request.goal_y.unwrap_or(scan_config.default_goal_y),
        );

        let mut obstacles = obstacles_from_scan(start, &request.scan_list, scan_config);
        obstacles.extend(scatter_obstacles(&mut self.rng, scan_config));

        let path = self.planner.plan(start, goal, &obstacles, &mut self.rng);
        let route = PlannedRoute { path, obstacles };
        info!(
            start_x = start.x,
            start_y = start.y,
            goal_x = goal.x,
            goal_y = goal.y,
            obstacles = route.obstacles.len(),
            waypoints = route.path.len(),
            found = route.is_found(),
            "Path planned"
        );
        route
    }

    // -----------------------------------------------------------------------
    // Feeds
    // -----------------------------------------------------------------------

    /// Fleet overview. Reads the battery without ticking it.
    pub fn fleet_status(&self) -> FleetStatus {
        feeds::fleet_status(self.rover.battery())
    }

    /// The disaster feed stamped with the current time.
    pub fn disaster_feed(&self) -> DisasterFeed {
        feeds::disaster_feed(self.clock.now())
    }

    /// The configuration this world was built with.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use rover_types::{FleetHealth, RoverStatus};

    use super::*;
    use crate::clock::ManualClock;
    use crate::config::{RoverConfig, ScanConfig};

    fn seeded_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.seed = Some(42);
        config
    }

    fn world_with(config: SimulationConfig) -> (SimulationWorld, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let world = SimulationWorld::with_clock(config, clock.clone());
        (world, clock)
    }

    fn world() -> (SimulationWorld, Arc<ManualClock>) {
        world_with(seeded_config())
    }

    fn ids(report: &SensorReport) -> Vec<&str> {
        report.survivors.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn start_session_resets_and_revokes_older_sessions() {
        let (mut world, _clock) = world();
        let first = world.start_session();
        world.move_rover(Direction::Forward);
        world.sensor_data();

        let second = world.start_session();
        assert_ne!(first, second);
        assert_eq!(world.session_count(), 1);
        assert!(!world.check_session(&first));
        assert!(world.check_session(&second));

        let snap = world.rover_snapshot();
        assert_eq!(snap.position, Point::new(2.0, 3.0));
        assert_eq!(snap.battery, 95.0);
        assert_eq!(snap.status, RoverStatus::Operational);
    }

    #[test]
    fn reset_revokes_sessions() {
        let (mut world, _clock) = world();
        let id = world.start_session();
        assert!(world.check_session(&id));
        world.reset();
        assert_eq!(world.session_count(), 0);
        assert!(!world.check_session(&id));
    }

    #[test]
    fn unknown_session_is_rejected() {
        let (mut world, _clock) = world();
        world.start_session();
        assert!(!world.check_session(&SessionId::new()));
    }

    #[test]
    fn status_read_drains_and_snapshot_does_not() {
        let (mut world, _clock) = world();
        let status = world.rover_status();
        assert!((status.battery - 94.95).abs() < 1e-9);
        assert_eq!(world.rover_snapshot(), world.rover_snapshot());
        assert_eq!(world.rover_snapshot().battery, status.battery);
    }

    #[test]
    fn sensor_data_detects_from_start_position() {
        let (mut world, _clock) = world();
        let report = world.sensor_data();
        assert_eq!(ids(&report), vec!["SRV-001", "SRV-002", "SRV-004"]);
        assert!((report.battery_level - 94.9).abs() < 1e-9);
    }

    #[test]
    fn detections_persist_after_moving_away() {
        let (mut world, _clock) = world();
        world.sensor_data();
        // Heading 90: backward walks toward negative Y.
        for _ in 0..10 {
            world.move_rover(Direction::Backward);
        }
        assert_eq!(world.rover_snapshot().position, Point::new(2.0, -7.0));
        let report = world.sensor_data();
        assert_eq!(ids(&report), vec!["SRV-001", "SRV-002", "SRV-004"]);
    }

    #[test]
    fn reset_clears_detections() {
        let (mut world, _clock) = world();
        assert_eq!(world.sensor_data().survivors.len(), 3);
        world.reset();
        for _ in 0..6 {
            world.move_rover(Direction::Backward);
        }
        // Nothing is within range of (2, -3).
        assert_eq!(world.rover_snapshot().position, Point::new(2.0, -3.0));
        assert!(world.sensor_data().survivors.is_empty());
    }

    #[test]
    fn recharge_cycle_through_facade() {
        let mut config = seeded_config();
        config.rover = RoverConfig {
            start_battery: 5.5,
            ..RoverConfig::default()
        };
        let (mut world, clock) = world_with(config);

        assert!(world.move_rover(Direction::Forward).success);
        assert_eq!(world.rover_snapshot().status, RoverStatus::Recharging);

        let refused = world.move_rover(Direction::Left);
        assert!(!refused.success);
        assert!(refused.message.contains("5.0%"));
        assert!(!world.stop_rover().success);

        clock.advance_secs(75.0);
        let status = world.rover_status();
        // The tick lands exactly on the ceiling, then the read drains.
        assert_eq!(status.status, RoverStatus::Operational);
        assert!((status.battery - 79.95).abs() < 1e-9);
        assert!(world.stop_rover().success);
    }

    #[test]
    fn plan_path_defaults_to_rover_position_and_default_goal() {
        let mut config = seeded_config();
        config.scan = ScanConfig {
            random_obstacles: 0,
            ..ScanConfig::default()
        };
        let (mut world, _clock) = world_with(config);
        let route = world.plan_path(&PathRequest::default());
        assert!(route.obstacles.is_empty());
        assert!(route.is_found());
        assert_eq!(route.path.first().copied(), Some(Point::new(2.0, 3.0)));
        let last = route.path.last().copied().unwrap_or_default();
        assert!(last.distance_to(Point::new(5.0, 5.0)) < 0.5);
    }

    #[test]
    fn plan_path_defaults_start_per_axis() {
        let mut config = seeded_config();
        config.scan.random_obstacles = 0;
        let (mut world, _clock) = world_with(config);
        let request = PathRequest {
            start_x: Some(1.0),
            ..PathRequest::default()
        };
        let route = world.plan_path(&request);
        assert_eq!(route.path.first().copied(), Some(Point::new(1.0, 3.0)));
    }

    #[test]
    fn plan_path_reports_scan_and_random_obstacles() {
        let (mut world, _clock) = world();
        let request = PathRequest {
            scan_list: vec![1.0, 9.0, 9.0, 9.0, 2.5],
            ..PathRequest::default()
        };
        let route = world.plan_path(&request);
        // Two scan returns plus five random points.
        assert_eq!(route.obstacles.len(), 7);
        if let Some(first) = route.path.first() {
            assert_eq!(*first, Point::new(2.0, 3.0));
        }
    }

    #[test]
    fn plan_path_leaves_battery_alone() {
        let (mut world, _clock) = world();
        let before = world.rover_snapshot().battery;
        world.plan_path(&PathRequest::default());
        assert_eq!(world.rover_snapshot().battery, before);
    }

    #[test]
    fn same_seed_same_route() {
        let (mut a, _) = world();
        let (mut b, _) = world();
        let request = PathRequest {
            goal_x: Some(8.0),
            goal_y: Some(2.0),
            ..PathRequest::default()
        };
        assert_eq!(a.plan_path(&request), b.plan_path(&request));
    }

    #[test]
    fn fleet_status_tracks_battery_without_ticking() {
        let mut config = seeded_config();
        config.rover.start_battery = 15.0;
        let (low, _clock) = world_with(config);
        assert_eq!(low.fleet_status().status, FleetHealth::LowBattery);
        assert_eq!(low.rover_snapshot().battery, 15.0);

        let (healthy, _clock) = world();
        assert_eq!(healthy.fleet_status().status, FleetHealth::Operational);
    }

    #[test]
    fn disaster_feed_uses_world_clock() {
        let (world, _clock) = world();
        let feed = world.disaster_feed();
        let stamp = feed.disasters.first().map(|d| d.timestamp.clone());
        assert_eq!(stamp.as_deref(), Some("1970-01-01T00:00:00Z"));
    }
}
