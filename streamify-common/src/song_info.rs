//! Resolution of the current song for display
//!
//! Nothing in here fails: an out-of-range cursor yields the "Unknown"
//! sentinel, missing metadata yields id-derived defaults, and a missing audio
//! file yields a song without a payload plus a warning.

use crate::catalog::{Catalog, SongMetadata};
use crate::media::MediaStore;
use crate::playback::PlaybackState;
use crate::playlist::ResolvedPlaylists;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use tracing::warn;

/// Placeholder used for every field of the sentinel song
pub const UNKNOWN: &str = "Unknown";

/// MIME type used when the id's extension is not recognised
const DEFAULT_AUDIO_MIME: &str = "audio/mpeg";

/// Audio bytes encoded for inline delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    pub mime_type: String,
    /// Standard-alphabet, padded base64 of the audio file
    pub base64: String,
}

impl AudioPayload {
    pub fn encode(id: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: audio_mime_type(id),
            base64: STANDARD.encode(bytes),
        }
    }

    /// `data:` URI usable as an `<audio src>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// MIME type for an audio id, from its extension
pub fn audio_mime_type(id: &str) -> String {
    mime_guess::from_path(id)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::AUDIO)
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_AUDIO_MIME.to_string())
}

/// Non-fatal problem found while resolving a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SongWarning {
    AudioMissing { id: String, reason: String },
}

impl std::fmt::Display for SongWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SongWarning::AudioMissing { id, reason } => {
                write!(f, "Audio file not available for {}: {}", id, reason)
            }
        }
    }
}

/// Everything the page needs to show the current song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDisplayInfo {
    /// `None` for the sentinel
    pub id: Option<String>,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub audio: Option<AudioPayload>,
    pub has_artwork: bool,
    pub warning: Option<SongWarning>,
}

impl SongDisplayInfo {
    /// Shown when the cursor points at no song
    pub fn unknown() -> Self {
        Self {
            id: None,
            title: UNKNOWN.to_string(),
            artist: UNKNOWN.to_string(),
            album: UNKNOWN.to_string(),
            audio: None,
            has_artwork: false,
            warning: None,
        }
    }
}

/// Song id under the cursor, if the cursor is in range
pub fn current_id<'a>(state: &PlaybackState, playlists: &'a ResolvedPlaylists) -> Option<&'a str> {
    playlists
        .get(state.active_playlist())?
        .get(state.current_index())
        .map(String::as_str)
}

/// Metadata of the song under the cursor, without touching media
pub fn resolve_metadata(
    state: &PlaybackState,
    playlists: &ResolvedPlaylists,
    catalog: &Catalog,
) -> Option<SongMetadata> {
    current_id(state, playlists).map(|id| catalog.metadata_or_default(id))
}

/// Resolve the song under the cursor, loading and encoding its audio
pub fn resolve_current<M: MediaStore + ?Sized>(
    state: &PlaybackState,
    playlists: &ResolvedPlaylists,
    catalog: &Catalog,
    media: &M,
) -> SongDisplayInfo {
    let Some(meta) = resolve_metadata(state, playlists, catalog) else {
        return SongDisplayInfo::unknown();
    };

    let (audio, warning) = match media.load_audio(&meta.id) {
        Ok(bytes) => (Some(AudioPayload::encode(&meta.id, &bytes)), None),
        Err(e) => {
            let warning = SongWarning::AudioMissing {
                id: meta.id.clone(),
                reason: e.to_string(),
            };
            warn!("{}", warning);
            (None, Some(warning))
        }
    };

    SongDisplayInfo {
        has_artwork: media.has_artwork(&meta.id),
        id: Some(meta.id),
        title: meta.title,
        artist: meta.artist,
        album: meta.album,
        audio,
        warning,
    }
}

/// One row of the song listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub artist: String,
    pub is_current: bool,
}

/// Rows for every song of the active playlist
pub fn listing(
    state: &PlaybackState,
    playlists: &ResolvedPlaylists,
    catalog: &Catalog,
) -> Vec<ListingRow> {
    let ids = playlists.get(state.active_playlist()).unwrap_or_default();
    ids.iter()
        .enumerate()
        .map(|(index, id)| {
            let meta = catalog.metadata_or_default(id);
            ListingRow {
                index,
                id: meta.id,
                title: meta.title,
                artist: meta.artist,
                is_current: index == state.current_index(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SongRecord;
    use crate::catalog::{UNKNOWN_ALBUM, UNKNOWN_ARTIST};
    use crate::playlist::{resolve, RawPlaylists};
    use std::collections::HashMap;
    use std::io;

    #[derive(Default)]
    struct MemoryMedia {
        audio: HashMap<String, Vec<u8>>,
        artwork: Vec<String>,
    }

    impl MediaStore for MemoryMedia {
        fn load_audio(&self, id: &str) -> io::Result<Vec<u8>> {
            self.audio
                .get(id)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn has_artwork(&self, id: &str) -> bool {
            self.artwork.iter().any(|a| a == id)
        }
    }

    fn fixture() -> (Catalog, ResolvedPlaylists) {
        let catalog = Catalog::from_records(vec![
            (
                "a.mp3".to_string(),
                SongRecord {
                    title: Some("Song A".to_string()),
                    artist: Some("Singer A".to_string()),
                    album: Some("Album A".to_string()),
                },
            ),
            ("b.mp3".to_string(), SongRecord::default()),
        ]);
        let raw = RawPlaylists::from_entries(vec![
            ("Favorites".to_string(), vec!["b.mp3".to_string()]),
            ("Ghosts".to_string(), vec!["ghost.mp3".to_string()]),
            ("Empty".to_string(), Vec::new()),
        ]);
        let playlists = resolve(&catalog, &raw).unwrap();
        (catalog, playlists)
    }

    #[test]
    fn test_favorites_scenario() {
        let (catalog, playlists) = fixture();
        let mut media = MemoryMedia::default();
        media.audio.insert("b.mp3".to_string(), b"bee".to_vec());

        let mut state = PlaybackState::new();
        state.select_playlist("Favorites", &playlists).unwrap();

        let song = resolve_current(&state, &playlists, &catalog, &media);
        assert_eq!(song.id.as_deref(), Some("b.mp3"));
        assert_eq!(song.title, "b");
        assert_eq!(song.artist, UNKNOWN_ARTIST);
        assert_eq!(song.album, UNKNOWN_ALBUM);
        let audio = song.audio.unwrap();
        assert_eq!(audio.mime_type, "audio/mpeg");
        assert_eq!(STANDARD.decode(&audio.base64).unwrap(), b"bee");
        assert!(song.warning.is_none());
    }

    #[test]
    fn test_missing_audio_keeps_metadata() {
        let (catalog, playlists) = fixture();
        let media = MemoryMedia {
            artwork: vec!["a.mp3".to_string()],
            ..Default::default()
        };

        let song = resolve_current(&PlaybackState::new(), &playlists, &catalog, &media);
        assert_eq!(song.title, "Song A");
        assert_eq!(song.artist, "Singer A");
        assert_eq!(song.album, "Album A");
        assert!(song.audio.is_none());
        assert!(song.has_artwork);
        assert!(matches!(
            song.warning,
            Some(SongWarning::AudioMissing { ref id, .. }) if id == "a.mp3"
        ));
    }

    #[test]
    fn test_empty_playlist_yields_sentinel() {
        let (catalog, playlists) = fixture();
        let mut state = PlaybackState::new();
        state.select_playlist("Empty", &playlists).unwrap();

        let song = resolve_current(&state, &playlists, &catalog, &MemoryMedia::default());
        assert_eq!(song, SongDisplayInfo::unknown());
    }

    #[test]
    fn test_out_of_range_index_yields_sentinel() {
        let (catalog, playlists) = fixture();
        let mut state = PlaybackState::new();
        state.select_index(1, &playlists).unwrap();

        // Same cursor against a catalog holding a single song
        let shrunk = resolve(
            &Catalog::from_records(vec![("a.mp3".to_string(), SongRecord::default())]),
            &RawPlaylists::from_entries(vec![("P".to_string(), Vec::new())]),
        )
        .unwrap();
        let song = resolve_current(&state, &shrunk, &catalog, &MemoryMedia::default());
        assert_eq!(song, SongDisplayInfo::unknown());
        assert!(listing(&state, &shrunk, &catalog).iter().all(|row| !row.is_current));
    }

    #[test]
    fn test_unknown_id_uses_derived_metadata() {
        let (catalog, playlists) = fixture();
        let mut state = PlaybackState::new();
        state.select_playlist("Ghosts", &playlists).unwrap();

        let song = resolve_current(&state, &playlists, &catalog, &MemoryMedia::default());
        assert_eq!(song.title, "ghost");
        assert_eq!(song.artist, UNKNOWN_ARTIST);
        assert!(song.audio.is_none());
    }

    #[test]
    fn test_listing_marks_current_row() {
        let (catalog, playlists) = fixture();
        let mut state = PlaybackState::new();
        state.select_index(1, &playlists).unwrap();

        let rows = listing(&state, &playlists, &catalog);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Song A");
        assert!(!rows[0].is_current);
        assert_eq!(rows[1].title, "b");
        assert_eq!(rows[1].artist, UNKNOWN_ARTIST);
        assert!(rows[1].is_current);
    }

    #[test]
    fn test_data_uri() {
        let payload = AudioPayload::encode("clip.mp3", &[0xff, 0x00, 0x10]);
        assert_eq!(payload.data_uri(), "data:audio/mpeg;base64,/wAQ");
    }

    #[test]
    fn test_unrecognised_extension_defaults_to_mpeg() {
        assert_eq!(audio_mime_type("track"), DEFAULT_AUDIO_MIME);
        assert_eq!(audio_mime_type("notes.txt"), DEFAULT_AUDIO_MIME);
    }
}
