//! HTTP request handlers for the pixelift API.
//!
//! This module contains the endpoint handlers and the router that wires them
//! together.

pub mod capture;
pub mod heartbeat;

pub use capture::capture_handler;
pub use heartbeat::heartbeat_handler;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::logging::create_http_trace_layer;
use crate::state::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/capture", post(capture_handler))
        .route("/heartbeat", get(heartbeat_handler));

    if let Some(static_dir) = &state.config.server.static_dir {
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    app.layer(DefaultBodyLimit::max(state.config.server.body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(create_http_trace_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_unknown_route_without_static_dir() {
        let state = AppState::new_shared(Config::default()).unwrap();
        let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_static_dir_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>camera</h1>").unwrap();

        let mut config = Config::default();
        config.server.static_dir = Some(dir.path().to_path_buf());
        let state = AppState::new_shared(config).unwrap();

        let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>camera</h1>");
    }
}
