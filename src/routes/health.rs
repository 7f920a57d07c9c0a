use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let longest_session_secs = state
        .sessions
        .iter()
        .map(|entry| entry.connected_at.elapsed().as_secs())
        .max()
        .unwrap_or(0);

    Json(json!({
        "status": "ok",
        "service": "hex-drift-words",
        "version": env!("CARGO_PKG_VERSION"),
        "active_sessions": state.sessions.len(),
        "longest_session_secs": longest_session_secs,
    }))
}
