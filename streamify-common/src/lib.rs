//! # Streamify+ Common Library
//!
//! Core of the Streamify+ music player:
//! - Catalog and playlist loading
//! - Playlist resolution ("All Songs" plus user playlists)
//! - Playback state machine (cursor, wraparound navigation, autoplay)
//! - Current-song resolution and base64 audio embedding
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod media;
pub mod playback;
pub mod playlist;
pub mod session;
pub mod song_info;

pub use error::{Error, Result};
pub use library::Library;
pub use playback::{PlaybackState, Step};
pub use session::{PlayerEvent, PlayerSession, PlayerView};
