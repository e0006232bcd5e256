use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage write failed for key '{key}': {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Reasons persisted state could not be turned back into a store value.
///
/// Never escapes store hydration; the store falls back to its default state.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported envelope version {found} (expected {expected})")]
    Version { expected: u32, found: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
