//! Core entity and snapshot structs for the Rescue Rover backend.
//!
//! Everything in here is a plain value: the mutable world lives in
//! `rover-core`, which hands out these snapshots for serialization.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DisasterKind, FleetHealth, RoverStatus, Severity, SurvivorStatus};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point on the 2D simulation plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// ---------------------------------------------------------------------------
// Rover
// ---------------------------------------------------------------------------

/// Full snapshot of the rover state returned by the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct RoverSnapshot {
    /// Current position.
    pub position: Point,
    /// Heading in degrees, `[0, 360)`.
    pub orientation: f64,
    /// Battery charge in percent.
    pub battery: f64,
    /// Current operational status.
    pub status: RoverStatus,
    /// Whether the battery is high enough to keep the radio link up.
    pub communication_active: bool,
}

/// Result of a rover command.
///
/// A refused command is not an error: it is reported with
/// `success = false` and a message explaining why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CommandOutcome {
    /// Whether the command was carried out.
    pub success: bool,
    /// Human-readable description of what happened.
    pub message: String,
}

impl CommandOutcome {
    /// A command that was carried out.
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A command that was refused without changing rover state.
    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Survivors and sensors
// ---------------------------------------------------------------------------

/// A survivor as reported to clients (the detection flag stays internal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Survivor {
    /// Stable registry identifier, e.g. `SRV-001`.
    pub id: String,
    /// Where the survivor is.
    pub location: Point,
    /// Triage status.
    pub status: SurvivorStatus,
}

/// Synthetic environmental readings, regenerated on every sensor read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct EnvironmentReadings {
    /// Ambient temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Radiation level in millisieverts per hour.
    pub radiation: f64,
    /// Air quality index, higher is cleaner.
    pub air_quality: f64,
}

/// Payload of the sensor-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SensorReport {
    /// Environmental readings for this call.
    #[serde(flatten)]
    pub readings: EnvironmentReadings,
    /// Battery charge in percent after this read.
    pub battery_level: f64,
    /// Every survivor detected so far, in registry order.
    pub survivors: Vec<Survivor>,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Output of the path planning endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlannedRoute {
    /// Waypoints from start to goal; empty when no path was found.
    pub path: Vec<Point>,
    /// Obstacles the planner had to avoid.
    pub obstacles: Vec<Point>,
}

impl PlannedRoute {
    /// Whether the planner found a route.
    pub const fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Fleet and disaster feed
// ---------------------------------------------------------------------------

/// Fleet overview. The backend simulates a single rover; the totals are
/// fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FleetStatus {
    /// Rovers currently deployed.
    pub active_rovers: u32,
    /// Rovers in the fleet.
    pub total_rovers: u32,
    /// Health derived from the simulated rover's battery.
    pub status: FleetHealth,
}

/// A disaster site in the disaster feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Disaster {
    /// Feed-local identifier.
    pub id: u32,
    /// What kind of disaster this is.
    #[serde(rename = "type")]
    pub kind: DisasterKind,
    /// Where it is.
    pub location: Point,
    /// How bad it is.
    pub severity: Severity,
    /// When it was reported, `%Y-%m-%dT%H:%M:%SZ`.
    pub timestamp: String,
}

/// Payload of the disaster-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DisasterFeed {
    /// Known disaster sites.
    pub disasters: Vec<Disaster>,
    /// Missions in progress.
    pub active_missions: u32,
}
