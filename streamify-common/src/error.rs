//! Common error types for Streamify+

use thiserror::Error;

/// Common result type for Streamify+ operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Streamify+ crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed catalog or playlist JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog loaded but holds no songs
    #[error("Catalog is empty: {0}")]
    EmptyCatalog(String),

    /// Playlist table loaded but holds no playlists
    #[error("Playlist table is empty: {0}")]
    EmptyPlaylists(String),

    /// Playlist name not present in the resolved playlists
    #[error("Unknown playlist: {0}")]
    UnknownPlaylist(String),

    /// Song index past the end of the active playlist
    #[error("Index {index} out of range for playlist of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request input that could not be parsed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Background task failed before producing a result
    #[error("Internal error: {0}")]
    Internal(String),
}
