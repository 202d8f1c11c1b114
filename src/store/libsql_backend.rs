//! libSQL backend: async `MessageStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::{ChatMessage, MessageStore, Role};

/// libSQL message store.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlMessageStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlMessageStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let store = Self::from_database(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Fixed-width RFC 3339 so timestamps sort correctly as text.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// Convert `Option<&str>` to libsql Value.
fn opt_text(s: Option<&str>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.to_string()),
        None => libsql::Value::Null,
    }
}

/// Map a libsql Row to a ChatMessage.
fn row_to_message(row: &libsql::Row) -> Result<ChatMessage, libsql::Error> {
    let role_str: String = row.get(2)?;
    let created_str: String = row.get(4)?;

    Ok(ChatMessage {
        session_id: row.get(0)?,
        user_id: row.get(1).ok(),
        role: Role::from_db(&role_str),
        content: row.get(3)?,
        created_at: parse_datetime(&created_str),
    })
}

// ── Trait implementation ────────────────────────────────────────────

#[async_trait]
impl MessageStore for LibSqlMessageStore {
    async fn append(&self, message: &ChatMessage) -> Result<(), DatabaseError> {
        let id = Uuid::new_v4().to_string();
        self.conn
            .execute(
                "INSERT INTO ai_messages (id, session_id, user_id, role, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id.clone(),
                    message.session_id.as_str(),
                    opt_text(message.user_id.as_deref()),
                    message.role.as_str(),
                    message.content.as_str(),
                    format_datetime(&message.created_at),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("append: {e}")))?;

        debug!(
            id = %id,
            session_id = %message.session_id,
            role = message.role.as_str(),
            "Chat message stored"
        );
        Ok(())
    }

    async fn history(&self, session_id: &str) -> Result<Vec<ChatMessage>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT session_id, user_id, role, content, created_at FROM ai_messages
                 WHERE session_id = ?1 ORDER BY created_at ASC, rowid ASC",
                params![session_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("history: {e}")))?;

        let mut messages = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("history: {e}")))?
        {
            let message = row_to_message(&row)
                .map_err(|e| DatabaseError::Query(format!("history row: {e}")))?;
            messages.push(message);
        }
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> LibSqlMessageStore {
        LibSqlMessageStore::new_memory().await.unwrap()
    }

    #[tokio::test]
    async fn append_and_read_back() {
        let store = test_store().await;
        let msg = ChatMessage::new("s1", Some("farmer".into()), Role::User, "wheat rust?");
        store.append(&msg).await.unwrap();

        let history = store.history("s1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "wheat rust?");
        assert_eq!(history[0].user_id.as_deref(), Some("farmer"));
        assert_eq!(history[0].role, Role::User);
        // Stored at microsecond precision.
        assert_eq!(
            history[0].created_at.timestamp_micros(),
            msg.created_at.timestamp_micros()
        );
    }

    #[tokio::test]
    async fn missing_user_id_reads_as_none() {
        let store = test_store().await;
        store
            .append(&ChatMessage::new("s1", None, Role::Assistant, "reply"))
            .await
            .unwrap();

        let history = store.history("s1").await.unwrap();
        assert_eq!(history[0].user_id, None);
        assert_eq!(history[0].role, Role::Assistant);
    }

    #[tokio::test]
    async fn history_keeps_insertion_order_for_equal_timestamps() {
        let store = test_store().await;
        let user = ChatMessage::new("s1", None, Role::User, "question");
        let mut reply = ChatMessage::new("s1", None, Role::Assistant, "answer");
        reply.created_at = user.created_at;

        store.append(&user).await.unwrap();
        store.append(&reply).await.unwrap();

        let roles: Vec<Role> = store
            .history("s1")
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[tokio::test]
    async fn history_is_sorted_by_time() {
        let store = test_store().await;
        let mut late = ChatMessage::new("s1", None, Role::User, "late");
        late.created_at = Utc::now();
        let mut early = ChatMessage::new("s1", None, Role::User, "early");
        early.created_at = late.created_at - chrono::Duration::seconds(5);

        store.append(&late).await.unwrap();
        store.append(&early).await.unwrap();

        let contents: Vec<String> = store
            .history("s1")
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["early", "late"]);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = test_store().await;
        store
            .append(&ChatMessage::new("a", None, Role::User, "one"))
            .await
            .unwrap();
        store
            .append(&ChatMessage::new("b", None, Role::User, "two"))
            .await
            .unwrap();

        assert_eq!(store.history("a").await.unwrap().len(), 1);
        assert!(store.history("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn new_local_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("dir").join("advisor.db");
        let store = LibSqlMessageStore::new_local(&db_path).await.unwrap();
        store
            .append(&ChatMessage::new("s1", None, Role::User, "hello"))
            .await
            .unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn parse_datetime_accepts_sqlite_format() {
        let dt = parse_datetime("2024-03-01 12:30:00.5");
        assert_eq!(dt.timestamp(), 1_709_296_200);
    }
}
