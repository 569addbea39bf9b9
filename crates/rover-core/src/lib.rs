//! Rover state machine, sessions, and the simulation facade.
//!
//! This crate owns the mutable world of the Rescue Rover backend: one
//! rover with its battery cycle, the survivor registry, the session map,
//! the path planner, and the random source. The HTTP layer talks to it
//! exclusively through [`SimulationWorld`].
//!
//! # Modules
//!
//! - [`clock`] -- [`Clock`] trait with wall-clock and manual
//!   implementations; the battery integrates over its deltas.
//! - [`config`] -- Configuration loading from `rover-config.yaml` into
//!   strongly-typed structs.
//! - [`feeds`] -- Static fleet and disaster feed stubs.
//! - [`rover`] -- Position, heading, battery drain/recharge cycle, and
//!   status transitions.
//! - [`scan`] -- Conversion of range scans and random scatter into
//!   planner obstacles.
//! - [`sensors`] -- Synthetic environmental readings with jitter.
//! - [`session`] -- Opaque session token issuance and lookup.
//! - [`world`] -- The [`SimulationWorld`] facade composing all of the
//!   above.
//!
//! [`Clock`]: clock::Clock
//! [`SimulationWorld`]: world::SimulationWorld

pub mod clock;
pub mod config;
pub mod feeds;
pub mod rover;
pub mod scan;
pub mod sensors;
pub mod session;
pub mod world;

pub use world::SimulationWorld;
