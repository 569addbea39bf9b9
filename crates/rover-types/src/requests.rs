//! Request payloads accepted by the rover API.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of a path planning request.
///
/// Every field is optional. Missing start coordinates fall back to the
/// rover's current position one coordinate at a time; a missing goal falls
/// back to the configured default goal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PathRequest {
    /// Start X coordinate.
    #[serde(default)]
    pub start_x: Option<f64>,
    /// Start Y coordinate.
    #[serde(default)]
    pub start_y: Option<f64>,
    /// Goal X coordinate.
    #[serde(default)]
    pub goal_x: Option<f64>,
    /// Goal Y coordinate.
    #[serde(default)]
    pub goal_y: Option<f64>,
    /// Range readings indexed by bearing in degrees.
    #[serde(default)]
    pub scan_list: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_uses_defaults() {
        let request: Result<PathRequest, _> = serde_json::from_str("{}");
        assert_eq!(request.ok(), Some(PathRequest::default()));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = r#"{"session_id": "sim-x", "goal_x": 7.5, "scan_list": [1.0, 4.0]}"#;
        let request = serde_json::from_str::<PathRequest>(body).unwrap_or_default();
        assert_eq!(request.goal_x, Some(7.5));
        assert_eq!(request.goal_y, None);
        assert_eq!(request.scan_list.len(), 2);
    }
}
