//! HTTP API for the advisor: chat, chat history and soil photo analysis.
//!
//! Handlers validate and persist; the decision logic lives in
//! `crate::advisory` and `crate::soil`. Every failure body has the shape
//! `{"success": false, "message": "..."}`.

pub mod chat;
pub mod soil;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AdvisorConfig;
use crate::error::{self, ConfigError};
use crate::store::{LibSqlMessageStore, MessageStore};

/// Multipart framing allowance on top of the image size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    /// Largest accepted soil image, in bytes.
    pub max_upload_bytes: usize,
    /// Side length soil images are resized to before analysis.
    pub grid_size: u32,
}

/// Build the Axum router with all advisor routes.
pub fn advisor_routes(
    store: Arc<dyn MessageStore>,
    config: &AdvisorConfig,
) -> Result<Router, ConfigError> {
    let origin =
        HeaderValue::from_str(&config.client_origin).map_err(|e| ConfigError::InvalidValue {
            key: "CLIENT_ORIGIN".to_string(),
            message: e.to_string(),
        })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let state = AppState {
        store,
        max_upload_bytes: config.max_upload_bytes,
        grid_size: config.grid_size,
    };

    Ok(Router::new()
        .route("/health", get(health))
        .route("/api/ai/chat", post(chat::chat))
        .route("/api/ai/history/{session_id}", get(chat::history))
        .route("/api/ai/soil", post(soil::analyze))
        .with_state(state)
        .layer(DefaultBodyLimit::max(
            config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Open the configured store and serve the API until the listener fails.
pub async fn serve(config: &AdvisorConfig) -> error::Result<()> {
    let store: Arc<dyn MessageStore> =
        Arc::new(LibSqlMessageStore::new_local(&config.db_path).await?);
    let app = advisor_routes(store, config)?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "Farm advisor listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "farm-advisor"
    }))
}

/// Error body shared by every handler.
pub(crate) fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Opaque storage or runtime failure; details stay in the log.
pub(crate) fn internal_error() -> Response {
    failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_unusable_client_origin() {
        let store: Arc<dyn MessageStore> =
            Arc::new(LibSqlMessageStore::new_memory().await.unwrap());
        let config = AdvisorConfig {
            client_origin: "http://bad\norigin".to_string(),
            ..AdvisorConfig::default()
        };
        let err = advisor_routes(store, &config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "CLIENT_ORIGIN"));
    }
}
