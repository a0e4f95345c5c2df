//! Playback cursor and autoplay state machine
//!
//! `PlaybackState` tracks which playlist is active, which song in it is
//! current, and whether the next rendered audio element should start on its
//! own. It has two phases:
//!
//! ```text
//!   Idle ──(select / navigate / track end)──▶ AutoplayArmed
//!    ▲                                             │
//!    └─────────────(consume_autoplay)──────────────┘
//! ```
//!
//! A fresh state starts Idle so nothing plays on the first page load.

use crate::playlist::{ResolvedPlaylists, ALL_SONGS};
use crate::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// Direction of a transport step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

/// Autoplay phase of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    Idle,
    AutoplayArmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    active_playlist: String,
    current_index: usize,
    autoplay_pending: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            active_playlist: ALL_SONGS.to_string(),
            current_index: 0,
            autoplay_pending: false,
        }
    }
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_playlist(&self) -> &str {
        &self.active_playlist
    }

    /// May be past the end of the active playlist; readers must check
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn autoplay_pending(&self) -> bool {
        self.autoplay_pending
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.autoplay_pending {
            PlaybackPhase::AutoplayArmed
        } else {
            PlaybackPhase::Idle
        }
    }

    /// Number of songs in the active playlist (0 if it is unknown)
    pub fn active_len(&self, playlists: &ResolvedPlaylists) -> usize {
        playlists
            .get(&self.active_playlist)
            .map_or(0, |ids| ids.len())
    }

    /// Switch to another playlist
    ///
    /// Switching resets the cursor to the first song and arms autoplay.
    /// Selecting the playlist that is already active changes nothing.
    /// Returns whether the active playlist changed.
    pub fn select_playlist(&mut self, name: &str, playlists: &ResolvedPlaylists) -> Result<bool> {
        if !playlists.contains(name) {
            return Err(Error::UnknownPlaylist(name.to_string()));
        }
        if name == self.active_playlist {
            return Ok(false);
        }

        debug!("Switching playlist '{}' -> '{}'", self.active_playlist, name);
        self.active_playlist = name.to_string();
        self.current_index = 0;
        self.autoplay_pending = true;
        Ok(true)
    }

    /// Move one song backward or forward, wrapping at both ends
    ///
    /// No-op on an empty playlist.
    pub fn navigate(&mut self, step: Step, playlists: &ResolvedPlaylists) {
        let len = self.active_len(playlists);
        if len == 0 {
            debug!("Ignoring {:?} on empty playlist '{}'", step, self.active_playlist);
            return;
        }

        let index = self.current_index % len;
        self.current_index = match step {
            Step::Next => (index + 1) % len,
            Step::Previous => (index + len - 1) % len,
        };
        self.autoplay_pending = true;
    }

    /// Jump to a song in the active playlist
    pub fn select_index(&mut self, index: usize, playlists: &ResolvedPlaylists) -> Result<()> {
        let len = self.active_len(playlists);
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }

        self.current_index = index;
        self.autoplay_pending = true;
        Ok(())
    }

    /// Playback reached the end of the current song
    pub fn on_track_end(&mut self, playlists: &ResolvedPlaylists) {
        self.navigate(Step::Next, playlists);
    }

    /// Read and clear the autoplay flag
    ///
    /// Call once per render, after deciding whether the audio element
    /// autoplays, so later re-renders do not restart playback.
    pub fn consume_autoplay(&mut self) -> bool {
        std::mem::take(&mut self.autoplay_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, SongRecord};
    use crate::playlist::{resolve, RawPlaylists};

    /// "All Songs" with `all` songs plus "Three" (3 songs) and "Empty"
    fn playlists(all: usize) -> ResolvedPlaylists {
        let catalog = Catalog::from_records(
            (0..all).map(|i| (format!("{}.mp3", i), SongRecord::default())),
        );
        let raw = RawPlaylists::from_entries(vec![
            (
                "Three".to_string(),
                vec!["0.mp3".to_string(), "1.mp3".to_string(), "2.mp3".to_string()],
            ),
            ("Empty".to_string(), Vec::new()),
        ]);
        resolve(&catalog, &raw).unwrap()
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = PlaybackState::new();
        assert_eq!(state.active_playlist(), ALL_SONGS);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn test_next_wraps_to_start() {
        let lists = playlists(5);
        let mut state = PlaybackState::new();
        state.select_playlist("Three", &lists).unwrap();
        state.select_index(2, &lists).unwrap();
        state.consume_autoplay();

        state.navigate(Step::Next, &lists);
        assert_eq!(state.current_index(), 0);
        assert!(state.autoplay_pending());
    }

    #[test]
    fn test_out_of_range_index_reduced_before_step() {
        let lists = playlists(5);
        let mut state = PlaybackState::new();
        state.select_playlist("Three", &lists).unwrap();

        state.current_index = 4;
        state.navigate(Step::Next, &lists);
        assert_eq!(state.current_index(), 2);

        state.current_index = 4;
        state.navigate(Step::Previous, &lists);
        assert_eq!(state.current_index(), 0);
        assert!(state.autoplay_pending());
    }

    #[test]
    fn test_previous_from_start_wraps_to_last() {
        let lists = playlists(4);
        let mut state = PlaybackState::new();

        state.navigate(Step::Previous, &lists);
        assert_eq!(state.current_index(), 3);
        assert_eq!(state.phase(), PlaybackPhase::AutoplayArmed);
    }

    #[test]
    fn test_reselecting_active_playlist_is_noop() {
        let lists = playlists(4);
        let mut state = PlaybackState::new();
        state.navigate(Step::Next, &lists);
        state.navigate(Step::Next, &lists);
        state.consume_autoplay();

        assert!(!state.select_playlist(ALL_SONGS, &lists).unwrap());
        assert_eq!(state.current_index(), 2);
        assert!(!state.autoplay_pending());
    }

    #[test]
    fn test_switching_playlist_resets_and_arms() {
        let lists = playlists(4);
        let mut state = PlaybackState::new();
        state.navigate(Step::Next, &lists);
        state.consume_autoplay();

        assert!(state.select_playlist("Three", &lists).unwrap());
        assert_eq!(state.active_playlist(), "Three");
        assert_eq!(state.current_index(), 0);
        assert!(state.autoplay_pending());
    }

    #[test]
    fn test_unknown_playlist_rejected() {
        let lists = playlists(2);
        let mut state = PlaybackState::new();
        let before = state.clone();

        let err = state.select_playlist("Nope", &lists).unwrap_err();
        assert!(matches!(err, Error::UnknownPlaylist(name) if name == "Nope"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_consume_autoplay_twice() {
        let lists = playlists(2);
        let mut state = PlaybackState::new();
        state.navigate(Step::Next, &lists);

        assert!(state.consume_autoplay());
        assert!(!state.consume_autoplay());
    }

    #[test]
    fn test_navigate_on_empty_playlist_is_noop() {
        let lists = playlists(2);
        let mut state = PlaybackState::new();
        state.select_playlist("Empty", &lists).unwrap();
        state.consume_autoplay();

        state.navigate(Step::Next, &lists);
        state.navigate(Step::Previous, &lists);
        state.on_track_end(&lists);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn test_select_index_bounds() {
        let lists = playlists(3);
        let mut state = PlaybackState::new();

        state.select_index(2, &lists).unwrap();
        assert_eq!(state.current_index(), 2);
        assert!(state.autoplay_pending());

        state.consume_autoplay();
        let err = state.select_index(3, &lists).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(state.current_index(), 2);
        assert!(!state.autoplay_pending());
    }

    #[test]
    fn test_track_end_advances_like_next() {
        let lists = playlists(3);
        let mut a = PlaybackState::new();
        let mut b = PlaybackState::new();

        for _ in 0..4 {
            a.on_track_end(&lists);
            b.navigate(Step::Next, &lists);
        }
        assert_eq!(a, b);
        assert_eq!(a.current_index(), 1);
    }
}
