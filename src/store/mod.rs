//! Persistence layer: libSQL-backed chat log.

pub mod libsql_backend;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlMessageStore;
pub use traits::{ChatMessage, MAX_MESSAGE_CHARS, MAX_SESSION_ID_CHARS, MessageStore, Role};
