//! Capture endpoint handler.
//!
//! Accepts a base64-encoded photo, upscales it and returns the result as a
//! PNG download.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::codec::{decode_base64_payload, decode_image, encode_png};
use crate::error::{PixeliftError, Result};
use crate::grid::ScaleFactor;
use crate::interpolation::{upscale_with, Technique, UpscaleOptions};
use crate::logging::{generate_request_id, log_request_error, log_timed_operation};
use crate::state::AppState;

/// File name offered to the client for the upscaled photo
pub const DOWNLOAD_NAME: &str = "enhanced_photo.png";

/// JSON body for the capture endpoint
#[derive(Debug, Deserialize)]
pub struct CaptureRequest {
    /// Photo as a `data:image/...;base64,` URL or bare base64
    pub image: String,
    /// Scale factor (defaults to the configured scale)
    pub scale: Option<u32>,
    /// Technique name, `nearest` or `bilinear` (defaults to the configured technique)
    pub technique: Option<String>,
}

/// Handle POST /capture requests
pub async fn capture_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CaptureRequest>, JsonRejection>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = PixeliftError::InvalidParameter {
                param: "body".to_string(),
                message: rejection.body_text(),
            };
            return error_response(error, &request_id, None);
        }
    };

    debug!(
        endpoint = "/capture",
        request_id = %request_id,
        payload_len = request.image.len(),
        scale = ?request.scale,
        technique = ?request.technique,
        "Processing capture request"
    );

    let options = match resolve_options(&state, &request) {
        Ok(options) => options,
        Err(error) => {
            let params = format!("scale={:?}, technique={:?}", request.scale, request.technique);
            return error_response(error, &request_id, Some(&params));
        }
    };

    let task_state = state.clone();
    let task_request_id = request_id.clone();
    let result = tokio::task::spawn_blocking(move || {
        process_capture(&task_state, &request.image, &options, &task_request_id)
    })
    .await
    .unwrap_or_else(|e| {
        Err(PixeliftError::Server {
            message: format!("Upscale task failed: {}", e),
        })
    });

    match result {
        Ok(png) => {
            info!(
                endpoint = "/capture",
                request_id = %request_id,
                technique = %options.technique,
                scale = options.scale.get(),
                response_bytes = png.len(),
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Capture upscaled"
            );

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "image/png".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", DOWNLOAD_NAME),
                    ),
                ],
                png,
            )
                .into_response()
        }
        Err(error) => error_response(error, &request_id, None),
    }
}

/// Merge request fields over the configured defaults
fn resolve_options(state: &AppState, request: &CaptureRequest) -> Result<UpscaleOptions> {
    let mut options = state.defaults;

    if let Some(scale) = request.scale {
        state.check_scale(scale)?;
        options.scale = ScaleFactor::try_from(scale)?;
    }

    if let Some(name) = &request.technique {
        options.technique = name.parse::<Technique>()?;
    }

    Ok(options)
}

/// Decode, persist, upscale and encode one photo
fn process_capture(
    state: &AppState,
    payload: &str,
    options: &UpscaleOptions,
    request_id: &str,
) -> Result<Vec<u8>> {
    let bytes = decode_base64_payload(payload)?;
    let original = decode_image(&bytes)?;
    let (height, width) = original.dimensions();
    state.check_output_size(height, width, options.scale)?;

    if state.store.is_persistent() {
        state.store.save("temp", &encode_png(&original)?)?;
    }

    let upscaled = log_timed_operation("upscale", request_id, || upscale_with(original, options))?;
    let png = encode_png(&upscaled)?;

    state.store.save("upscaled", &png)?;
    Ok(png)
}

fn error_response(error: PixeliftError, request_id: &str, params: Option<&str>) -> Response {
    log_request_error(&error, "/capture", request_id, params);

    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(serde_json::json!({
            "error": error.to_string(),
            "request_id": request_id
        })),
    )
        .into_response()
}
