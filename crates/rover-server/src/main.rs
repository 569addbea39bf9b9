//! Server binary for the Rescue Rover mock backend.
//!
//! Loads configuration, builds the simulation world, and serves the HTTP
//! API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `rover-config.yaml` (or `ROVER_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulation world
//! 4. Serve the HTTP API until `Ctrl-C`
//! 5. Log the final rover state

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use rover_api::AppState;
use rover_core::SimulationWorld;
use rover_core::config::SimulationConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "rover-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the server
/// cannot bind or serve.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("rover-server starting");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        host = %config.server.host,
        port = config.server.port,
        seed = ?config.world.seed,
        detection_radius = config.world.detection_radius,
        max_iterations = config.planner.max_iterations,
        "Configuration"
    );

    // 3. Build the simulation world.
    let server_config = config.server.clone();
    let state = Arc::new(AppState::new(SimulationWorld::new(config)));

    // 4. Serve until Ctrl-C.
    rover_api::start_server(&server_config, Arc::clone(&state), shutdown_signal()).await?;

    // 5. Log the final state.
    let world = state.world.lock().await;
    let rover = world.rover_snapshot();
    info!(
        x = rover.position.x,
        y = rover.position.y,
        battery = rover.battery,
        status = rover.status.as_str(),
        sessions = world.session_count(),
        "rover-server stopped"
    );
    Ok(())
}

/// Load configuration from `ROVER_CONFIG` or `rover-config.yaml`.
///
/// A missing file means defaults. Returns the path actually read, if any,
/// so it can be logged once the subscriber is installed.
fn load_config() -> Result<(SimulationConfig, Option<PathBuf>), AppError> {
    let path = std::env::var_os("ROVER_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        Ok((SimulationConfig::parse("")?, None))
    }
}

/// Resolve when the process receives `Ctrl-C`.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
