//! HTTP API for the Rescue Rover mock backend.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Session endpoint** (`POST /api/session/start`) that resets the
//!   world and issues a `sim-<uuid>` token
//! - **Rover endpoints** for status, sensor data, movement, and stop
//! - **Path planning** (`POST /api/rrt_planner`) around scan-derived and
//!   random obstacles
//! - **Feed stubs** for fleet status and disaster data
//! - **Minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! The whole simulation lives in one [`SimulationWorld`] behind a
//! `tokio::sync::Mutex` in [`AppState`]. Every endpoint except the index
//! and session start sits behind the [`session::require_session`]
//! middleware, which resolves the client token before the handler runs.
//!
//! [`SimulationWorld`]: rover_core::SimulationWorld
//! [`AppState`]: state::AppState

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod session;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
