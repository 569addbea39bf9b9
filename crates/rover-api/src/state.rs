//! Shared application state for the rover API.

use rover_core::SimulationWorld;
use tokio::sync::Mutex;

/// State shared by every handler.
///
/// A single mutex serializes all access to the world, so a battery tick
/// and the mutation that follows it are never interleaved with another
/// request.
#[derive(Debug)]
pub struct AppState {
    /// The simulation.
    pub world: Mutex<SimulationWorld>,
}

impl AppState {
    /// Wrap a world for sharing across handlers.
    pub fn new(world: SimulationWorld) -> Self {
        Self {
            world: Mutex::new(world),
        }
    }
}
