//! `MessageStore` trait: append-only chat log keyed by session.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;

/// Longest chat message accepted, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Longest session identifier accepted, in characters.
pub const MAX_SESSION_ID_CHARS: usize = 100;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Parse the stored column value. Unknown values read as `User`.
    pub fn from_db(s: &str) -> Self {
        match s {
            "assistant" => Self::Assistant,
            _ => Self::User,
        }
    }
}

/// One turn of a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub session_id: String,
    pub user_id: Option<String>,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// A message stamped with the current time.
    pub fn new(
        session_id: impl Into<String>,
        user_id: Option<String>,
        role: Role,
        content: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            user_id,
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Backend-agnostic chat log.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message to its session.
    async fn append(&self, message: &ChatMessage) -> Result<(), DatabaseError>;

    /// All messages of a session, oldest first.
    async fn history(&self, session_id: &str) -> Result<Vec<ChatMessage>, DatabaseError>;
}
