//! Geometry, survivors, and path planning for the Rescue Rover simulation.
//!
//! This crate models the physical side of the world the rover drives
//! through. It holds no clock and no global state: every mutable piece is
//! owned by the caller, and randomness is always passed in.
//!
//! # Modules
//!
//! - [`geometry`] -- Polar offsets, stepping, rounding, and heading
//!   normalization on top of [`Point`].
//! - [`planner`] -- Goal-biased rapidly-exploring random tree planner.
//! - [`survivors`] -- The fixed survivor registry with radius detection
//!   and persistent detection memory.
//!
//! [`Point`]: rover_types::Point

pub mod geometry;
pub mod planner;
pub mod survivors;

// Re-export primary types at crate root.
pub use planner::{PathPlanner, PlannerConfig};
pub use survivors::{DEFAULT_DETECTION_RADIUS, SurvivorRegistry};
