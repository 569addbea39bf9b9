//! Axum router construction for the rover API.
//!
//! Assembles all routes into a single [`Router`] with CORS enabled for
//! cross-origin dashboard access and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::session::require_session;
use crate::state::AppState;

/// Build the complete Axum router for the rover backend.
///
/// Open routes:
/// - `GET /` -- minimal HTML status page
/// - `POST /api/session/start` -- reset and issue a session token
///
/// Session-gated routes:
/// - `POST /api/rrt_planner`
/// - `GET /api/rover/status`
/// - `GET /api/rover/sensor-data`
/// - `POST /api/rover/move`
/// - `POST /api/rover/stop`
/// - `GET /api/fleet/status`
/// - `GET /api/disaster-rover-data`
///
/// CORS allows any origin, method and header, and answers preflight
/// `OPTIONS` requests before they reach the session gate.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let gated = Router::new()
        .route("/api/rrt_planner", post(handlers::plan_path))
        .route("/api/rover/status", get(handlers::rover_status))
        .route("/api/rover/sensor-data", get(handlers::sensor_data))
        .route("/api/rover/move", post(handlers::move_rover))
        .route("/api/rover/stop", post(handlers::stop_rover))
        .route("/api/fleet/status", get(handlers::fleet_status))
        .route("/api/disaster-rover-data", get(handlers::disaster_data))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_session,
        ));

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Sessions
        .route("/api/session/start", post(handlers::start_session))
        .merge(gated)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
