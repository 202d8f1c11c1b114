//! Error types for the farm advisor.
//!
//! The decision engines themselves never fail. Everything here belongs to the
//! collaborators around them: configuration, storage, image intake and chat
//! request validation.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Soil image intake errors.
///
/// Raised before a `SoilSample` exists; once a sample is built, metric
/// extraction and classification are total.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Pixel grid must be non-empty, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for an RGB grid")]
    BufferMismatch { expected: usize, actual: usize },

    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("Image is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Chat request validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message required")]
    MissingMessage,

    #[error("message too long: {length} > {max} characters")]
    MessageTooLong { length: usize, max: usize },

    #[error("Invalid session ID")]
    InvalidSessionId,
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
