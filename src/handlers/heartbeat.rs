//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime, memory usage and the
//! upscaling defaults in effect.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::interpolation::{Technique, TrailingEdge};
use crate::state::AppState;

/// Unique per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Heartbeat response structure
#[derive(Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Process memory usage in bytes
    pub memory_usage_bytes: Option<u64>,
    /// Upscaling defaults
    pub upscale: UpscaleInfo,
    /// Server status
    pub status: String,
}

/// Upscaling defaults reported by the heartbeat
#[derive(Serialize)]
pub struct UpscaleInfo {
    pub default_scale: usize,
    pub default_technique: Technique,
    pub trailing_edge: TrailingEdge,
    pub max_scale: u32,
    pub max_output_pixels: usize,
    pub persist: bool,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        memory_usage_bytes: get_memory_usage(),
        upscale: UpscaleInfo {
            default_scale: state.defaults.scale.get(),
            default_technique: state.defaults.technique,
            trailing_edge: state.defaults.trailing_edge,
            max_scale: state.config.upscale.max_scale,
            max_output_pixels: state.config.upscale.max_output_pixels,
            persist: state.store.is_persistent(),
        },
        status: "healthy".to_string(),
    })
}

/// Resident set size of this process, Linux only
fn get_memory_usage() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        // Second field of statm is RSS in pages
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
        Some(pages * 4096)
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}
