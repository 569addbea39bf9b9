//! Error types for the rover API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! failure uses the same envelope:
//!
//! ```json
//! { "status": "error", "error": "<message>", "timestamp": "<RFC 3339>" }
//! ```
//!
//! A refused rover command is not an error; it is a normal response with
//! `success: false`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

/// Errors that can occur in the rover API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No session token in the query string or JSON body.
    #[error("Session ID is required")]
    MissingSession,

    /// A token was supplied but names no issued session.
    #[error("Invalid or expired session")]
    InvalidSession,

    /// The request could not be understood.
    #[error("{0}")]
    MalformedRequest(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingSession | Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "status": "error",
            "error": self.to_string(),
            "timestamp": Utc::now().to_rfc3339(),
        });

        (status, axum::Json(body)).into_response()
    }
}
