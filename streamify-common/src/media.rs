//! Audio and artwork storage
//!
//! Audio lives at `music/<id>`; artwork at `album_art/<id>` with `.mp3`
//! replaced by `.jpg`. Ids may name files in subfolders.

use crate::config::LibraryPaths;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Source of per-song media blobs
pub trait MediaStore {
    /// Raw audio bytes for a song
    fn load_audio(&self, id: &str) -> io::Result<Vec<u8>>;

    /// Whether a cover image exists for a song
    fn has_artwork(&self, id: &str) -> bool;
}

/// Artwork file name for a song id
pub fn artwork_key(id: &str) -> String {
    id.replace(".mp3", ".jpg")
}

/// True when `id` is a relative path that stays inside its folder
///
/// Only normal components are allowed: no root, no `..`, no `.` prefix.
/// Backslashes and NUL are refused on every platform.
fn is_contained(id: &str) -> bool {
    !id.is_empty()
        && !id.contains(['\\', '\0'])
        && Path::new(id)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Media store backed by the root folder layout
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    music_dir: PathBuf,
    artwork_dir: PathBuf,
}

impl FsMediaStore {
    pub fn new(paths: &LibraryPaths) -> Self {
        Self {
            music_dir: paths.music_dir(),
            artwork_dir: paths.artwork_dir(),
        }
    }

    pub fn audio_path(&self, id: &str) -> Option<PathBuf> {
        is_contained(id).then(|| self.music_dir.join(id))
    }

    pub fn artwork_path(&self, id: &str) -> Option<PathBuf> {
        let key = artwork_key(id);
        is_contained(&key).then(|| self.artwork_dir.join(key))
    }
}

fn invalid_id(id: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, format!("invalid song id: {:?}", id))
}

impl MediaStore for FsMediaStore {
    fn load_audio(&self, id: &str) -> io::Result<Vec<u8>> {
        let path = self.audio_path(id).ok_or_else(|| invalid_id(id))?;
        std::fs::read(path)
    }

    fn has_artwork(&self, id: &str) -> bool {
        self.artwork_path(id).is_some_and(|p| p.is_file())
    }
}
