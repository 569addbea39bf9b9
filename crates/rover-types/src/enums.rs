//! Enumeration types for the Rescue Rover backend.
//!
//! Wire names are lowercase to match what the dashboard client expects
//! (`"operational"`, `"critical"`, `"forward"`, ...).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Rover
// ---------------------------------------------------------------------------

/// Operational status of the rover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum RoverStatus {
    /// Ready to accept commands.
    Operational,
    /// Executed a movement command most recently.
    Moving,
    /// Stopped by an explicit stop command.
    Idle,
    /// Battery fell to the critical level; commands are refused until the
    /// recharge ceiling is reached.
    Recharging,
}

impl RoverStatus {
    /// Lowercase wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Moving => "moving",
            Self::Idle => "idle",
            Self::Recharging => "recharging",
        }
    }
}

/// A movement command accepted by the rover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Direction {
    /// Translate one unit along the current heading.
    Forward,
    /// Translate one unit against the current heading.
    Backward,
    /// Rotate 90 degrees counter-clockwise in place.
    Left,
    /// Rotate 90 degrees clockwise in place.
    Right,
}

impl Direction {
    /// Lowercase wire name of the direction.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a direction string names no known [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction `{0}` (expected forward, backward, left or right)")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(UnknownDirection(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Survivors
// ---------------------------------------------------------------------------

/// Medical triage status of a survivor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SurvivorStatus {
    /// No immediate danger.
    Stable,
    /// Needs treatment.
    Injured,
    /// Needs immediate evacuation.
    Critical,
}

// ---------------------------------------------------------------------------
// Fleet and disaster feed stubs
// ---------------------------------------------------------------------------

/// Coarse fleet health derived from the rover battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum FleetHealth {
    /// Battery above the fleet warning level.
    #[serde(rename = "operational")]
    Operational,
    /// Battery at or below the fleet warning level.
    #[serde(rename = "low battery")]
    LowBattery,
}

/// Kind of disaster reported by the disaster feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum DisasterKind {
    /// Fire.
    Fire,
}

/// Severity grading of a reported disaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Severity {
    /// Life threatening.
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_wire_names() {
        for direction in [
            Direction::Forward,
            Direction::Backward,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(direction.as_str().parse::<Direction>(), Ok(direction));
        }
    }

    #[test]
    fn direction_rejects_unknown() {
        let parsed = "sideways".parse::<Direction>();
        assert_eq!(parsed, Err(UnknownDirection("sideways".to_owned())));
        // Wire names are case sensitive, like the query parameter.
        assert!("Forward".parse::<Direction>().is_err());
    }

    #[test]
    fn statuses_serialize_lowercase() {
        let json = serde_json::to_string(&RoverStatus::Recharging).ok();
        assert_eq!(json.as_deref(), Some("\"recharging\""));
        assert_eq!(RoverStatus::Recharging.as_str(), "recharging");
        let json = serde_json::to_string(&SurvivorStatus::Critical).ok();
        assert_eq!(json.as_deref(), Some("\"critical\""));
    }

    #[test]
    fn fleet_health_uses_spaced_name() {
        let json = serde_json::to_string(&FleetHealth::LowBattery).ok();
        assert_eq!(json.as_deref(), Some("\"low battery\""));
    }
}
