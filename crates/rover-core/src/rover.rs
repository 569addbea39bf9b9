//! The rover state machine.
//!
//! Owns position, heading, battery charge, and status for the single
//! simulated rover. Time is passed in explicitly: every operation starts
//! with a battery tick that integrates recharge over the wall-clock delta
//! since the previous tick.
//!
//! # Status transitions
//!
//! ```text
//!   any ──(battery <= critical, on tick)──► recharging
//!   recharging ──(battery >= ceiling, on tick)──► operational
//!   operational | moving | idle ──(move)──► moving
//!   operational | moving | idle ──(stop)──► idle
//! ```
//!
//! While recharging, move and stop are refused and report the reason in a
//! [`CommandOutcome`]; reads still work but do not drain.

use chrono::{DateTime, Utc};
use rover_types::{CommandOutcome, Direction, Point, RoverSnapshot, RoverStatus};
use rover_world::geometry::{normalize_degrees, offset_polar, round_point};
use tracing::{info, warn};

use crate::clock::elapsed_seconds;
use crate::config::{BatteryConfig, RoverConfig};

/// Degrees turned by a left or right command.
const TURN_DEGREES: f64 = 90.0;

/// Degrees added to the heading for a backward move.
const REVERSE_DEGREES: f64 = 180.0;

/// Mutable state of the simulated rover.
#[derive(Debug, Clone)]
pub struct Rover {
    position: Point,
    orientation: f64,
    battery: f64,
    status: RoverStatus,
    communication_active: bool,
    /// Latched when the battery hits the critical level, released at the
    /// recharge ceiling. Drives the `recharging` status.
    recharging: bool,
    last_update: DateTime<Utc>,
    config: RoverConfig,
    battery_config: BatteryConfig,
}

impl Rover {
    /// Create a rover in its reset pose.
    pub fn new(config: RoverConfig, battery_config: BatteryConfig, now: DateTime<Utc>) -> Self {
        let mut rover = Self {
            position: Point::default(),
            orientation: 0.0,
            battery: 0.0,
            status: RoverStatus::Operational,
            communication_active: false,
            recharging: false,
            last_update: now,
            config,
            battery_config,
        };
        rover.reset(now);
        rover
    }

    /// Restore the configured start pose and full start battery, clear the
    /// recharge latch, and restart battery integration at `now`.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.position = Point::new(self.config.start_x, self.config.start_y);
        self.orientation = normalize_degrees(self.config.start_orientation);
        self.battery = self.config.start_battery.clamp(0.0, 100.0);
        self.status = RoverStatus::Operational;
        self.recharging = false;
        self.last_update = now;
        self.communication_active = self.battery >= self.battery_config.communication_threshold;
    }

    /// Advance the battery to `now` and return whether the rover is
    /// recharging afterwards.
    pub fn update_battery(&mut self, now: DateTime<Utc>) -> bool {
        let elapsed = elapsed_seconds(self.last_update, now);
        self.last_update = now;

        let cfg = &self.battery_config;
        if !self.recharging && self.battery <= cfg.critical_level {
            info!(battery = self.battery, "Battery critical, starting recharge");
            self.recharging = true;
            self.status = RoverStatus::Recharging;
        }

        if self.recharging {
            let charged = self.battery + cfg.recharge_rate * elapsed;
            self.battery = charged.min(cfg.recharge_ceiling);
            if self.battery >= cfg.recharge_ceiling {
                info!(battery = self.battery, "Battery recharged, resuming operations");
                self.recharging = false;
                self.status = RoverStatus::Operational;
            }
        }

        self.communication_active = self.battery >= cfg.communication_threshold;
        self.recharging
    }

    /// Remove `amount` percent of charge, flooring at zero.
    pub fn drain(&mut self, amount: f64) {
        self.battery = (self.battery - amount).max(0.0);
    }

    /// Execute a movement command at `now`.
    ///
    /// Refused while recharging. Otherwise drains the move cost, sets the
    /// status to `moving`, applies the motion, and ticks the battery again
    /// so a move that crosses the critical level starts recharging at once.
    pub fn try_move(&mut self, direction: Direction, now: DateTime<Utc>) -> CommandOutcome {
        if self.update_battery(now) {
            warn!(%direction, battery = self.battery, "Move refused while recharging");
            return CommandOutcome::refused(format!(
                "Cannot move rover: Battery at {:.1}% - currently recharging",
                self.battery
            ));
        }

        self.drain(self.config.move_drain);
        self.status = RoverStatus::Moving;
        self.apply_direction(direction);
        self.update_battery(now);

        info!(
            %direction,
            x = self.position.x,
            y = self.position.y,
            orientation = self.orientation,
            "Rover moved"
        );
        CommandOutcome::accepted(format!("Rover moved {direction}"))
    }

    /// Execute a stop command at `now`. Refused while recharging; no drain.
    pub fn try_stop(&mut self, now: DateTime<Utc>) -> CommandOutcome {
        if self.update_battery(now) {
            warn!(battery = self.battery, "Stop refused while recharging");
            return CommandOutcome::refused(
                "Rover is currently in recharging mode and cannot be operated",
            );
        }
        self.status = RoverStatus::Idle;
        info!("Rover stopped");
        CommandOutcome::accepted("Rover stopped")
    }

    /// Tick, drain the status-read cost unless recharging, and snapshot.
    pub fn read_status(&mut self, now: DateTime<Utc>) -> RoverSnapshot {
        if !self.update_battery(now) {
            self.drain(self.config.status_drain);
        }
        self.snapshot()
    }

    /// Tick and drain the sensor-read cost unless recharging. Returns the
    /// battery level to report with the readings.
    pub fn read_sensors(&mut self, now: DateTime<Utc>) -> f64 {
        if !self.update_battery(now) {
            self.drain(self.config.sensor_drain);
        }
        self.battery
    }

    /// Current state without ticking or draining.
    pub const fn snapshot(&self) -> RoverSnapshot {
        RoverSnapshot {
            position: self.position,
            orientation: self.orientation,
            battery: self.battery,
            status: self.status,
            communication_active: self.communication_active,
        }
    }

    /// Current position.
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Current battery percent.
    pub const fn battery(&self) -> f64 {
        self.battery
    }

    /// Whether the recharge latch is set.
    pub const fn is_recharging(&self) -> bool {
        self.recharging
    }

    fn apply_direction(&mut self, direction: Direction) {
        match direction {
            Direction::Forward => {
                self.position = offset_polar(self.position, self.config.move_step, self.orientation);
            }
            Direction::Backward => {
                self.position = offset_polar(
                    self.position,
                    self.config.move_step,
                    self.orientation + REVERSE_DEGREES,
                );
            }
            Direction::Left => {
                self.orientation = normalize_degrees(self.orientation - TURN_DEGREES);
            }
            Direction::Right => {
                self.orientation = normalize_degrees(self.orientation + TURN_DEGREES);
            }
        }
        self.position = round_point(self.position);
    }
}
