//! Session gate middleware.
//!
//! Resolves the client's session token before a gated handler runs. The
//! token is taken from the `session_id` query parameter or, failing that,
//! from a `session_id` string field of a JSON request body. The body is
//! buffered and put back so the handler can still read it.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, Request, State};
use axum::http::{HeaderMap, Uri, header};
use axum::middleware::Next;
use axum::response::Response;
use rover_types::SessionId;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Largest JSON body the gate will buffer while looking for a token.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The session that authorized the current request.
///
/// Inserted as a request extension by [`require_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSession(pub SessionId);

#[derive(Debug, Deserialize)]
struct SessionQuery {
    session_id: Option<String>,
}

/// Reject the request unless it carries a known session token.
///
/// # Errors
///
/// - [`ApiError::MissingSession`] when no token is present.
/// - [`ApiError::InvalidSession`] when the token is malformed or unknown.
/// - [`ApiError::MalformedRequest`] when a JSON body cannot be read or
///   parsed while looking for the token.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (token, mut request) = extract_token(request).await?;
    let token = token.ok_or(ApiError::MissingSession)?;
    let id: SessionId = token.parse().map_err(|e| {
        debug!(error = %e, "Unparseable session token");
        ApiError::InvalidSession
    })?;

    if !state.world.lock().await.check_session(&id) {
        return Err(ApiError::InvalidSession);
    }

    request.extensions_mut().insert(ActiveSession(id));
    Ok(next.run(request).await)
}

/// Find the raw token, handing the request back intact.
async fn extract_token(request: Request) -> Result<(Option<String>, Request), ApiError> {
    if let Some(token) = query_token(request.uri()) {
        return Ok((Some(token), request));
    }
    if !is_json(request.headers()) {
        return Ok((None, request));
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ApiError::MalformedRequest(format!("failed to read request body: {e}")))?;

    let token = if bytes.is_empty() {
        None
    } else {
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::MalformedRequest(format!("invalid JSON body: {e}")))?;
        value
            .get("session_id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
    };

    Ok((token, Request::from_parts(parts, Body::from(bytes))))
}

fn query_token(uri: &Uri) -> Option<String> {
    Query::<SessionQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(q)| q.session_id)
}

/// Whether the request declares a JSON body (`application/json` or an
/// `application/*+json` subtype).
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(content_type: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(content_type) {
            map.insert(header::CONTENT_TYPE, value);
        }
        map
    }

    #[test]
    fn json_content_types() {
        assert!(is_json(&headers("application/json")));
        assert!(is_json(&headers("application/json; charset=utf-8")));
        assert!(is_json(&headers("Application/JSON")));
        assert!(is_json(&headers("application/vnd.rover+json")));
        assert!(!is_json(&headers("text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn token_from_query() {
        let uri: Uri = "/api/rover/move?direction=left&session_id=sim-abc"
            .parse()
            .unwrap_or_default();
        assert_eq!(query_token(&uri).as_deref(), Some("sim-abc"));

        let uri: Uri = "/api/rover/status".parse().unwrap_or_default();
        assert_eq!(query_token(&uri), None);
    }
}
