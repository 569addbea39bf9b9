//! Fleet and disaster feed stubs.
//!
//! The backend simulates one rover. These feeds give the dashboard the
//! fleet-level and incident-level shapes it expects, with fixed content.

use chrono::{DateTime, Utc};
use rover_types::{Disaster, DisasterFeed, DisasterKind, FleetHealth, FleetStatus, Point, Severity};

/// Rovers reported as deployed.
const ACTIVE_ROVERS: u32 = 1;
/// Rovers reported in the fleet.
const TOTAL_ROVERS: u32 = 3;
/// Above this battery percent the fleet reports as operational.
const LOW_BATTERY_LEVEL: f64 = 20.0;
/// Disaster feed timestamp format.
const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Fleet overview derived from the simulated rover's battery.
pub fn fleet_status(battery: f64) -> FleetStatus {
    let status = if battery > LOW_BATTERY_LEVEL {
        FleetHealth::Operational
    } else {
        FleetHealth::LowBattery
    };
    FleetStatus {
        active_rovers: ACTIVE_ROVERS,
        total_rovers: TOTAL_ROVERS,
        status,
    }
}

/// The static disaster feed, stamped with `now`.
pub fn disaster_feed(now: DateTime<Utc>) -> DisasterFeed {
    DisasterFeed {
        disasters: vec![Disaster {
            id: 1,
            kind: DisasterKind::Fire,
            location: Point::new(5.0, 5.0),
            severity: Severity::High,
            timestamp: now.format(FEED_TIMESTAMP_FORMAT).to_string(),
        }],
        active_missions: 1,
    }
}
