//! Configuration types.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default upload cap for soil photographs.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default side length of the normalized soil pixel grid.
pub const DEFAULT_GRID_SIZE: u32 = 256;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Port the HTTP server binds on `0.0.0.0`.
    pub port: u16,
    /// Path of the libSQL database holding the chat log.
    pub db_path: PathBuf,
    /// Single origin allowed by CORS (the web client).
    pub client_origin: String,
    /// Largest accepted soil image upload, in bytes.
    pub max_upload_bytes: usize,
    /// Uploaded images are resized to `grid_size` x `grid_size` before analysis.
    pub grid_size: u32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: PathBuf::from("./data/farm-advisor.db"),
            client_origin: "http://localhost:5173".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl AdvisorConfig {
    /// Build configuration from environment variables, falling back to defaults.
    ///
    /// Variables that are set but unparsable are reported rather than ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_env("AI_SERVER_PORT")?.unwrap_or(defaults.port);
        let db_path = std::env::var("AI_ADVISOR_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);
        let client_origin = std::env::var("CLIENT_ORIGIN").unwrap_or(defaults.client_origin);
        let max_upload_bytes =
            parse_env("AI_ADVISOR_MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes);
        let grid_size = parse_env("AI_ADVISOR_GRID_SIZE")?.unwrap_or(defaults.grid_size);

        if grid_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "AI_ADVISOR_GRID_SIZE".to_string(),
                message: "grid size must be at least 1".to_string(),
            });
        }

        Ok(Self {
            port,
            db_path,
            client_origin,
            max_upload_bytes,
            grid_size,
        })
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?}: {e}"),
    })
}
