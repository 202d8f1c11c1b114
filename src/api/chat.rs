//! Chat and history endpoints.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{AppState, failure, internal_error};
use crate::advisory::classify_and_respond;
use crate::error::ChatError;
use crate::store::{ChatMessage, MAX_MESSAGE_CHARS, MAX_SESSION_ID_CHARS, Role};

/// Body of `POST /api/ai/chat`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One entry of a history response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryEntry {
    role: Role,
    content: String,
    created_at: String,
}

/// Trim a user message and enforce the length limits.
pub fn validate_message(raw: &str) -> Result<String, ChatError> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(ChatError::MissingMessage);
    }
    let length = message.chars().count();
    if length > MAX_MESSAGE_CHARS {
        return Err(ChatError::MessageTooLong {
            length,
            max: MAX_MESSAGE_CHARS,
        });
    }
    Ok(message.to_string())
}

/// Check a session identifier supplied by a client.
pub fn validate_session_id(session_id: &str) -> Result<(), ChatError> {
    let length = session_id.chars().count();
    if length == 0 || length > MAX_SESSION_ID_CHARS {
        return Err(ChatError::InvalidSessionId);
    }
    Ok(())
}

/// Fresh opaque session token: 8 random bytes as 16 hex characters.
pub fn new_session_id() -> String {
    let bytes: [u8; 8] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a chat body as JSON regardless of its declared content type.
/// A literal `null` reads as an empty request.
pub fn parse_chat_body(body: &[u8]) -> Result<ChatRequest, serde_json::Error> {
    let request: Option<ChatRequest> = serde_json::from_slice(body)?;
    Ok(request.unwrap_or_default())
}

fn chat_failure(err: &ChatError) -> Response {
    let message = match err {
        ChatError::MissingMessage => "message required",
        ChatError::MessageTooLong { .. } => "message too long",
        ChatError::InvalidSessionId => "Invalid session ID",
    };
    failure(StatusCode::BAD_REQUEST, message)
}

/// POST /api/ai/chat
///
/// Stores the user turn, generates the advisory reply, stores it, and returns
/// it together with the (possibly newly minted) session id.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match parse_chat_body(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejected chat body");
            return failure(StatusCode::BAD_REQUEST, "invalid JSON body");
        }
    };

    let message = match validate_message(request.message.as_deref().unwrap_or_default()) {
        Ok(message) => message,
        Err(e) => return chat_failure(&e),
    };

    let session_id = match request.session_id.filter(|s| !s.is_empty()) {
        Some(id) => {
            if let Err(e) = validate_session_id(&id) {
                return chat_failure(&e);
            }
            id
        }
        None => new_session_id(),
    };

    let user_turn = ChatMessage::new(&session_id, request.user_id.clone(), Role::User, &message);
    if let Err(e) = state.store.append(&user_turn).await {
        error!(session_id = %session_id, error = %e, "Failed to store user message");
        return internal_error();
    }

    let reply = classify_and_respond(&message);

    let assistant_turn = ChatMessage::new(&session_id, request.user_id, Role::Assistant, &reply);
    if let Err(e) = state.store.append(&assistant_turn).await {
        error!(session_id = %session_id, error = %e, "Failed to store assistant reply");
        return internal_error();
    }

    info!(session_id = %session_id, "Chat turn answered");
    Json(serde_json::json!({
        "success": true,
        "sessionId": session_id,
        "reply": reply,
    }))
    .into_response()
}

/// GET /api/ai/history/{session_id}
pub async fn history(State(state): State<AppState>, Path(session_id): Path<String>) -> Response {
    if let Err(e) = validate_session_id(&session_id) {
        return chat_failure(&e);
    }

    let messages = match state.store.history(&session_id).await {
        Ok(messages) => messages,
        Err(e) => {
            error!(session_id = %session_id, error = %e, "Failed to load history");
            return internal_error();
        }
    };

    let entries: Vec<HistoryEntry> = messages
        .into_iter()
        .map(|m| HistoryEntry {
            role: m.role,
            content: m.content,
            created_at: m.created_at.to_rfc3339(),
        })
        .collect();

    Json(serde_json::json!({ "success": true, "messages": entries })).into_response()
}
