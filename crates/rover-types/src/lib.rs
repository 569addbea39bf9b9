//! Shared type definitions for the Rescue Rover mock backend.
//!
//! This crate is the single source of truth for the wire types exchanged
//! between the backend and the dashboard. Types flow downstream to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Opaque session token type
//! - [`enums`] -- Rover status, directions, survivor triage, feed enums
//! - [`structs`] -- Points, snapshots and endpoint payloads
//! - [`requests`] -- Request bodies accepted by the API

pub mod enums;
pub mod ids;
pub mod requests;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Direction, DisasterKind, FleetHealth, RoverStatus, Severity, SurvivorStatus, UnknownDirection,
};
pub use ids::{SESSION_PREFIX, SessionId, SessionIdError};
pub use requests::PathRequest;
pub use structs::{
    CommandOutcome, Disaster, DisasterFeed, EnvironmentReadings, FleetStatus, PlannedRoute, Point,
    RoverSnapshot, SensorReport, Survivor,
};
