//! Configuration loading and typed config structures for the rover backend.
//!
//! The canonical configuration lives in `rover-config.yaml` at the project
//! root. Every field carries a serde default, so a partial file, an empty
//! file, or no file at all yields a working configuration with the stock
//! rover behavior.

use std::path::Path;

use rover_world::{DEFAULT_DETECTION_RADIUS, PlannerConfig};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level backend configuration.
///
/// Mirrors the structure of `rover-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// World-level settings (seed, detection radius).
    #[serde(default)]
    pub world: WorldConfig,

    /// Rover reset pose and per-operation battery drain.
    #[serde(default)]
    pub rover: RoverConfig,

    /// Battery thresholds and recharge rate.
    #[serde(default)]
    pub battery: BatteryConfig,

    /// Path planner parameters.
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Scan-to-obstacle conversion and planner request defaults.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listener:
    /// - `ROVER_HOST` overrides `server.host`
    /// - `ROVER_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as unit, not as an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_env_overrides();
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Apply `ROVER_HOST` / `ROVER_PORT` from the environment.
    ///
    /// A `ROVER_PORT` that is not a valid port number is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ROVER_HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("ROVER_PORT") {
            if let Ok(port) = val.parse() {
                self.port = port;
            }
        }
    }

    /// The `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    5000
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Random seed. `None` seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Distance within which survivors are detected.
    #[serde(default = "default_detection_radius")]
    pub detection_radius: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            detection_radius: default_detection_radius(),
        }
    }
}

const fn default_detection_radius() -> f64 {
    DEFAULT_DETECTION_RADIUS
}

// ---------------------------------------------------------------------------
// Rover
// ---------------------------------------------------------------------------

/// Rover reset pose and drain per operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoverConfig {
    /// X coordinate after a reset.
    #[serde(default = "default_start_x")]
    pub start_x: f64,

    /// Y coordinate after a reset.
    #[serde(default = "default_start_y")]
    pub start_y: f64,

    /// Heading in degrees after a reset.
    #[serde(default = "default_start_orientation")]
    pub start_orientation: f64,

    /// Battery percent after a reset.
    #[serde(default = "default_start_battery")]
    pub start_battery: f64,

    /// Distance covered by one forward or backward move.
    #[serde(default = "default_move_step")]
    pub move_step: f64,

    /// Battery percent consumed by a move.
    #[serde(default = "default_move_drain")]
    pub move_drain: f64,

    /// Battery percent consumed by a sensor read.
    #[serde(default = "default_sensor_drain")]
    pub sensor_drain: f64,

    /// Battery percent consumed by a status read.
    #[serde(default = "default_status_drain")]
    pub status_drain: f64,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            start_x: default_start_x(),
            start_y: default_start_y(),
            start_orientation: default_start_orientation(),
            start_battery: default_start_battery(),
            move_step: default_move_step(),
            move_drain: default_move_drain(),
            sensor_drain: default_sensor_drain(),
            status_drain: default_status_drain(),
        }
    }
}

const fn default_start_x() -> f64 {
    2.0
}

const fn default_start_y() -> f64 {
    3.0
}

const fn default_start_orientation() -> f64 {
    90.0
}

const fn default_start_battery() -> f64 {
    95.0
}

const fn default_move_step() -> f64 {
    1.0
}

const fn default_move_drain() -> f64 {
    0.5
}

const fn default_sensor_drain() -> f64 {
    0.1
}

const fn default_status_drain() -> f64 {
    0.05
}

// ---------------------------------------------------------------------------
// Battery
// ---------------------------------------------------------------------------

/// Battery thresholds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatteryConfig {
    /// At or below this percent the rover starts recharging.
    #[serde(default = "default_critical_level")]
    pub critical_level: f64,

    /// Recharging stops once the battery reaches this percent.
    #[serde(default = "default_recharge_ceiling")]
    pub recharge_ceiling: f64,

    /// Percent gained per second while recharging.
    #[serde(default = "default_recharge_rate")]
    pub recharge_rate: f64,

    /// The radio link is up while the battery is at or above this percent.
    #[serde(default = "default_communication_threshold")]
    pub communication_threshold: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            critical_level: default_critical_level(),
            recharge_ceiling: default_recharge_ceiling(),
            recharge_rate: default_recharge_rate(),
            communication_threshold: default_communication_threshold(),
        }
    }
}

const fn default_critical_level() -> f64 {
    5.0
}

const fn default_recharge_ceiling() -> f64 {
    80.0
}

const fn default_recharge_rate() -> f64 {
    1.0
}

const fn default_communication_threshold() -> f64 {
    10.0
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// How planner requests are turned into obstacles and default goals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScanConfig {
    /// Only the first this-many scan entries are considered.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Scan readings strictly below this range become obstacles.
    #[serde(default = "default_obstacle_range")]
    pub obstacle_range: f64,

    /// Random obstacles injected into every plan.
    #[serde(default = "default_random_obstacles")]
    pub random_obstacles: usize,

    /// Lower bound of the random obstacle square.
    #[serde(default = "default_random_min")]
    pub random_min: f64,

    /// Upper bound of the random obstacle square.
    #[serde(default = "default_random_max")]
    pub random_max: f64,

    /// Goal X used when a request omits it.
    #[serde(default = "default_goal")]
    pub default_goal_x: f64,

    /// Goal Y used when a request omits it.
    #[serde(default = "default_goal")]
    pub default_goal_y: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            obstacle_range: default_obstacle_range(),
            random_obstacles: default_random_obstacles(),
            random_min: default_random_min(),
            random_max: default_random_max(),
            default_goal_x: default_goal(),
            default_goal_y: default_goal(),
        }
    }
}

const fn default_max_entries() -> usize {
    20
}

const fn default_obstacle_range() -> f64 {
    3.0
}

const fn default_random_obstacles() -> usize {
    5
}

const fn default_random_min() -> f64 {
    1.0
}

const fn default_random_max() -> f64 {
    9.0
}

const fn default_goal() -> f64 {
    5.0
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_stock_rover() {
        let config = SimulationConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.world.seed, None);
        assert_eq!(config.rover.start_x, 2.0);
        assert_eq!(config.rover.start_y, 3.0);
        assert_eq!(config.rover.start_orientation, 90.0);
        assert_eq!(config.rover.start_battery, 95.0);
        assert_eq!(config.battery.critical_level, 5.0);
        assert_eq!(config.battery.recharge_ceiling, 80.0);
        assert_eq!(config.planner.max_iterations, 1000);
        assert_eq!(config.scan.max_entries, 20);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080

world:
  seed: 123
  detection_radius: 3.5

rover:
  start_x: 0.0
  start_y: 0.0
  start_orientation: 0.0
  start_battery: 50.0
  move_step: 2.0
  move_drain: 1.0
  sensor_drain: 0.2
  status_drain: 0.1

battery:
  critical_level: 10.0
  recharge_ceiling: 90.0
  recharge_rate: 2.0
  communication_threshold: 15.0

planner:
  max_iterations: 500
  goal_bias: 0.2
  step_size: 0.25
  collision_radius: 0.4
  goal_tolerance: 0.3
  sample_min: -5.0
  sample_max: 15.0

scan:
  max_entries: 36
  obstacle_range: 2.0
  random_obstacles: 0
  random_min: 0.0
  random_max: 10.0
  default_goal_x: 8.0
  default_goal_y: 9.0

logging:
  level: "debug"
"#;
        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok(), "Failed to parse: {config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.world.seed, Some(123));
        assert_eq!(config.world.detection_radius, 3.5);
        assert_eq!(config.rover.start_battery, 50.0);
        assert_eq!(config.rover.move_step, 2.0);
        assert_eq!(config.battery.recharge_rate, 2.0);
        assert_eq!(config.planner.max_iterations, 500);
        assert_eq!(config.planner.sample_min, -5.0);
        assert_eq!(config.scan.max_entries, 36);
        assert_eq!(config.scan.random_obstacles, 0);
        assert_eq!(config.scan.default_goal_y, 9.0);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "world:\n  seed: 7\n";
        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Seed is overridden
        assert_eq!(config.world.seed, Some(7));
        // Everything else uses defaults
        assert_eq!(config.world.detection_radius, 5.0);
        assert_eq!(config.rover.move_drain, 0.5);
        assert_eq!(config.planner.goal_bias, 0.1);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SimulationConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn parse_rejects_wrong_types() {
        let config = SimulationConfig::parse("server:\n  port: not-a-port\n");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let config = SimulationConfig::from_file(Path::new("/nonexistent/rover-config.yaml"));
        assert!(matches!(config, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        };
        assert_eq!(server.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("rover-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
