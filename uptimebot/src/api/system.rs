//! System API (process info, targets and alert gate state).

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// GET /api/system response body
#[derive(Debug, Serialize)]
pub struct SystemInfoResponse {
    version: &'static str,
    pid: u32,
    primary: String,
    target_count: usize,
    targets: Vec<String>,
    alert_gate: &'static str,
}

/// GET /api/system
pub async fn get_system(State(state): State<AppState>) -> Json<SystemInfoResponse> {
    let targets = state.monitor.targets();
    let alert_gate = if state.monitor.debouncer().is_open() {
        "open"
    } else {
        "closed"
    };

    Json(SystemInfoResponse {
        version: env!("CARGO_PKG_VERSION"),
        pid: std::process::id(),
        primary: targets.primary().to_string(),
        target_count: targets.len(),
        targets: targets.urls().to_vec(),
        alert_gate,
    })
}
