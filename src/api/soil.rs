//! Soil photo upload endpoint.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error, info, warn};

use super::{AppState, failure, internal_error};
use crate::error::ImageError;
use crate::soil::{self, SoilVerdict, sample::is_allowed_content_type};

/// Multipart field carrying the photo.
const IMAGE_FIELD: &str = "image";

const MIB: usize = 1024 * 1024;

fn too_large_message(limit: usize) -> String {
    format!("file too large (max {}MB)", limit.div_ceil(MIB))
}

fn image_failure(err: &ImageError, limit: usize) -> Response {
    match err {
        ImageError::UnsupportedType(_) => failure(StatusCode::BAD_REQUEST, "invalid file type"),
        ImageError::TooLarge { .. } => failure(StatusCode::BAD_REQUEST, too_large_message(limit)),
        ImageError::Decode(_)
        | ImageError::EmptyGrid { .. }
        | ImageError::BufferMismatch { .. } => failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to analyze soil image",
        ),
    }
}

fn multipart_failure(err: &MultipartError, limit: usize) -> Response {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return failure(StatusCode::BAD_REQUEST, too_large_message(limit));
    }
    debug!(error = %err, "Malformed multipart body");
    failure(StatusCode::BAD_REQUEST, "invalid multipart body")
}

/// Check an upload before decoding it.
pub fn check_upload(
    content_type: Option<&str>,
    size: usize,
    limit: usize,
) -> Result<(), ImageError> {
    let content_type = content_type.unwrap_or_default();
    if !is_allowed_content_type(content_type) {
        return Err(ImageError::UnsupportedType(content_type.to_string()));
    }
    if size > limit {
        return Err(ImageError::TooLarge { size, limit });
    }
    Ok(())
}

/// POST /api/ai/soil
///
/// Expects a multipart form with an `image` file field (JPEG, PNG or WebP).
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let limit = state.max_upload_bytes;
    let Ok(mut multipart) = multipart else {
        return failure(StatusCode::BAD_REQUEST, "image file required");
    };

    let (content_type, data) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return failure(StatusCode::BAD_REQUEST, "image file required"),
            Err(e) => return multipart_failure(&e, limit),
        };
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        match field.bytes().await {
            Ok(data) => break (content_type, data),
            Err(e) => return multipart_failure(&e, limit),
        }
    };

    if let Err(e) = check_upload(content_type.as_deref(), data.len(), limit) {
        warn!(error = %e, "Rejected soil upload");
        return image_failure(&e, limit);
    }

    let grid_size = state.grid_size;
    let analysis = tokio::task::spawn_blocking(move || soil::analyze_image(&data, grid_size)).await;

    let verdict = match analysis {
        Ok(Ok(verdict)) => verdict,
        Ok(Err(e)) => {
            warn!(error = %e, "Soil analysis failed");
            return image_failure(&e, limit);
        }
        Err(e) => {
            error!(error = %e, "Soil analysis task panicked");
            return internal_error();
        }
    };

    info!(status = verdict.status.label(), "Soil image analyzed");
    let result = SoilVerdict {
        metrics: verdict.metrics.rounded(),
        ..verdict
    };
    Json(serde_json::json!({ "success": true, "result": result })).into_response()
}
