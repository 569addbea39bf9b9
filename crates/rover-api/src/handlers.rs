//! REST API endpoint handlers for the rover backend.
//!
//! Every handler locks the shared world once, runs one facade operation,
//! and serializes the result.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/api/session/start` | Reset the world and issue a session token |
//! | `POST` | `/api/rrt_planner` | Plan a path around obstacles |
//! | `GET` | `/api/rover/status` | Rover snapshot |
//! | `GET` | `/api/rover/sensor-data` | Environment readings and detected survivors |
//! | `POST` | `/api/rover/move` | Drive the rover (`?direction=`) |
//! | `POST` | `/api/rover/stop` | Stop the rover |
//! | `GET` | `/api/fleet/status` | Fleet overview |
//! | `GET` | `/api/disaster-rover-data` | Disaster feed |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Query, State};
use axum::response::{Html, IntoResponse};
use rover_types::{Direction, PathRequest};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::session::ActiveSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `POST /api/rover/move` endpoint.
#[derive(Debug, Deserialize)]
pub struct MoveQuery {
    /// `forward` (default), `backward`, `left` or `right`.
    pub direction: Option<String>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the rover state and the API surface.
///
/// Reads the rover without ticking the battery or draining it.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (rover, sessions) = {
        let world = state.world.lock().await;
        (world.rover_snapshot(), world.session_count())
    };
    let x = rover.position.x;
    let y = rover.position.y;
    let orientation = rover.orientation;
    let battery = rover.battery;
    let status = rover.status.as_str();
    let link = if rover.communication_active {
        "UP"
    } else {
        "DOWN"
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Rescue Rover Backend</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #f0883e; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #f0883e; font-size: 1.5rem; font-weight: bold; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .verb {{ color: #7ee787; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Rescue Rover Backend</h1>
    <p class="subtitle">Simulated disaster-response rover</p>

    <p>Server: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Position</div>
            <div class="value">({x:.2}, {y:.2})</div>
        </div>
        <div class="metric">
            <div class="label">Heading</div>
            <div class="value">{orientation:.0}&deg;</div>
        </div>
        <div class="metric">
            <div class="label">Battery</div>
            <div class="value">{battery:.1}%</div>
        </div>
        <div class="metric">
            <div class="label">Status</div>
            <div class="value">{status}</div>
        </div>
        <div class="metric">
            <div class="label">Link</div>
            <div class="value">{link}</div>
        </div>
        <div class="metric">
            <div class="label">Sessions</div>
            <div class="value">{sessions}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <p>All endpoints except session start need <code>session_id</code> in the query string or JSON body.</p>
    <ul>
        <li><span class="verb">POST</span> /api/session/start -- Reset the world and start a session</li>
        <li><span class="verb">POST</span> /api/rrt_planner -- Plan a path (JSON body)</li>
        <li><span class="verb">GET</span> /api/rover/status -- Rover position, heading, battery</li>
        <li><span class="verb">GET</span> /api/rover/sensor-data -- Environment readings and survivors</li>
        <li><span class="verb">POST</span> /api/rover/move?direction=forward|backward|left|right -- Drive</li>
        <li><span class="verb">POST</span> /api/rover/stop -- Stop</li>
        <li><span class="verb">GET</span> /api/fleet/status -- Fleet overview</li>
        <li><span class="verb">GET</span> /api/disaster-rover-data -- Disaster feed</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// POST /api/session/start
// ---------------------------------------------------------------------------

/// Reset the simulation and issue a fresh session token.
pub async fn start_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session_id = state.world.lock().await.start_session();
    info!(session = %session_id, "Started new session");

    Json(serde_json::json!({
        "session_id": session_id,
        "message": "Session started successfully",
        "status": "success",
    }))
}

// ---------------------------------------------------------------------------
// POST /api/rrt_planner
// ---------------------------------------------------------------------------

/// Plan a path from the request's start (default: rover position) to its
/// goal around scan-derived and random obstacles.
///
/// An unreachable goal is a normal response with an empty `path`.
pub async fn plan_path(
    State(state): State<Arc<AppState>>,
    Extension(ActiveSession(session)): Extension<ActiveSession>,
    payload: Result<Json<PathRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::MalformedRequest("Request must be JSON".to_owned())
        }
        other => ApiError::MalformedRequest(other.body_text()),
    })?;

    debug!(session = %session, scan_entries = request.scan_list.len(), "Planning request");
    let route = state.world.lock().await.plan_path(&request);

    Ok(Json(serde_json::json!({
        "path": route.path,
        "obstacles": route.obstacles,
        "status": "success",
    })))
}

// ---------------------------------------------------------------------------
// Rover
// ---------------------------------------------------------------------------

/// Return the rover snapshot. Each read costs a little battery.
pub async fn rover_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.world.lock().await.rover_status())
}

/// Return fresh environment readings and every survivor detected so far.
pub async fn sensor_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.world.lock().await.sensor_data())
}

/// Drive the rover one step or turn it in place.
///
/// # Query Parameters
///
/// - `direction`: `forward` | `backward` | `left` | `right` (default: `forward`)
pub async fn move_rover(
    State(state): State<Arc<AppState>>,
    Extension(ActiveSession(session)): Extension<ActiveSession>,
    Query(params): Query<MoveQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let direction: Direction = params
        .direction
        .as_deref()
        .unwrap_or("forward")
        .parse()
        .map_err(|e: rover_types::UnknownDirection| ApiError::MalformedRequest(e.to_string()))?;

    debug!(session = %session, %direction, "Move command");
    Ok(Json(state.world.lock().await.move_rover(direction)))
}

/// Stop the rover.
pub async fn stop_rover(
    State(state): State<Arc<AppState>>,
    Extension(ActiveSession(session)): Extension<ActiveSession>,
) -> impl IntoResponse {
    debug!(session = %session, "Stop command");
    Json(state.world.lock().await.stop_rover())
}

// ---------------------------------------------------------------------------
// Feeds
// ---------------------------------------------------------------------------

/// Return the fleet overview.
pub async fn fleet_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.world.lock().await.fleet_status())
}

/// Return the disaster feed.
pub async fn disaster_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.world.lock().await.disaster_feed())
}
