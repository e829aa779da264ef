//! Logging utilities for the pixelift server.
//!
//! Structured `tracing` output for the HTTP layer and for the upscaling
//! pipeline behind it.

use std::time::Instant;
use tracing::{debug, error, info, warn, Level};

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::error::PixeliftError;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    // Upscales can take a while, millisecond resolution is enough
    let response_formatter = DefaultOnResponse::new()
        .level(Level::INFO)
        .latency_unit(LatencyUnit::Millis);

    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_tracing(log_level: &str) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .init();
}

/// Run `f`, logging its duration under `operation`.
///
/// Results that are `Err` are logged as warnings.
pub fn log_timed_operation<T, F>(operation: &str, request_id: &str, f: F) -> crate::Result<T>
where
    F: FnOnce() -> crate::Result<T>,
{
    let start = Instant::now();

    debug!(
        operation = operation,
        request_id = request_id,
        "Starting operation"
    );

    let result = f();
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    match &result {
        Ok(_) => info!(
            operation = operation,
            request_id = request_id,
            duration_ms = duration_ms,
            "Operation completed"
        ),
        Err(e) => warn!(
            operation = operation,
            request_id = request_id,
            duration_ms = duration_ms,
            error = %e,
            "Operation failed"
        ),
    }

    result
}

/// Log an error that occurred during request processing
pub fn log_request_error(
    error: &PixeliftError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    error!(
        error = %error,
        endpoint = endpoint,
        request_id = request_id,
        params = params.unwrap_or("none"),
        client_error = error.is_client_error(),
        "Request processing error"
    );
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
