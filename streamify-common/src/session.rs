//! Per-session event pipeline
//!
//! Every user action goes through the same pass: apply the event to the
//! session's `PlaybackState`, then build the view from state and library.
//! Building the view consumes the autoplay flag, so it runs once per render.

use crate::library::Library;
use crate::media::MediaStore;
use crate::playback::{PlaybackPhase, PlaybackState, Step};
use crate::song_info::{self, ListingRow, SongDisplayInfo};
use crate::Result;
use serde::Serialize;
use tracing::debug;

/// User or player action that mutates playback state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    SelectPlaylist(String),
    Previous,
    Next,
    SelectIndex(usize),
    TrackEnded,
}

/// Everything the render layer needs for one page
#[derive(Debug, Clone)]
pub struct PlayerView {
    pub playlist_names: Vec<String>,
    pub active_playlist: String,
    pub current_index: usize,
    pub song: SongDisplayInfo,
    /// Audio element should start without a click
    pub autoplay: bool,
    pub listing: Vec<ListingRow>,
}

/// Read-only snapshot of the session for JSON clients
#[derive(Debug, Clone, Serialize)]
pub struct NowPlaying {
    pub active_playlist: String,
    pub current_index: usize,
    pub playlist_len: usize,
    pub phase: PlaybackPhase,
    pub song_id: Option<String>,
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// Owns the playback state of one listener
#[derive(Debug, Clone, Default)]
pub struct PlayerSession {
    state: PlaybackState,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Apply one event; on error the state is unchanged
    pub fn apply(&mut self, event: PlayerEvent, library: &Library) -> Result<()> {
        debug!("Applying {:?}", event);
        let playlists = library.playlists();
        match event {
            PlayerEvent::SelectPlaylist(name) => {
                self.state.select_playlist(&name, playlists)?;
            }
            PlayerEvent::Previous => self.state.navigate(Step::Previous, playlists),
            PlayerEvent::Next => self.state.navigate(Step::Next, playlists),
            PlayerEvent::SelectIndex(index) => self.state.select_index(index, playlists)?,
            PlayerEvent::TrackEnded => self.state.on_track_end(playlists),
        }
        Ok(())
    }

    /// Resolve the current song and build the page view
    ///
    /// The autoplay flag is consumed here. The audio element only autoplays
    /// when there is audio to play.
    pub fn render_view<M: MediaStore + ?Sized>(&mut self, library: &Library, media: &M) -> PlayerView {
        let catalog = library.catalog();
        let playlists = library.playlists();

        let song = song_info::resolve_current(&self.state, playlists, catalog, media);
        let armed = self.state.consume_autoplay();

        PlayerView {
            playlist_names: playlists.names().map(str::to_string).collect(),
            active_playlist: self.state.active_playlist().to_string(),
            current_index: self.state.current_index(),
            autoplay: armed && song.audio.is_some(),
            listing: song_info::listing(&self.state, playlists, catalog),
            song,
        }
    }

    /// Snapshot without loading audio or consuming autoplay
    pub fn now_playing(&self, library: &Library) -> NowPlaying {
        let meta = song_info::resolve_metadata(&self.state, library.playlists(), library.catalog());
        let unknown = song_info::UNKNOWN.to_string();

        NowPlaying {
            active_playlist: self.state.active_playlist().to_string(),
            current_index: self.state.current_index(),
            playlist_len: self.state.active_len(library.playlists()),
            phase: self.state.phase(),
            song_id: meta.as_ref().map(|m| m.id.clone()),
            title: meta.as_ref().map_or_else(|| unknown.clone(), |m| m.title.clone()),
            artist: meta.as_ref().map_or_else(|| unknown.clone(), |m| m.artist.clone()),
            album: meta.map_or(unknown, |m| m.album),
        }
    }
}
