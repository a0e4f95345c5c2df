//! Player page and transport actions
//!
//! Actions apply one event to the session and answer `303 See Other` to `/`.
//! The page render that follows resolves the song and consumes autoplay.

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;
use streamify_common::session::NowPlaying;
use streamify_common::{Error, PlayerEvent};

use super::ApiError;
use crate::{render, AppState};

/// Form body for POST /playlist
#[derive(Debug, Deserialize)]
pub struct PlaylistForm {
    pub name: String,
}

/// GET /
///
/// Renders the player page for the current session state. Loading and
/// encoding the audio happens on the blocking pool with the session held.
pub async fn player_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let mut session = state.session.clone().lock_owned().await;
    let library = state.library.clone();
    let media = state.media.clone();

    let page = tokio::task::spawn_blocking(move || {
        let view = session.render_view(&library, media.as_ref());
        render::render_page(&view)
    })
    .await
    .map_err(|e| ApiError(Error::Internal(format!("Render task failed: {}", e))))?;

    Ok(Html(page))
}

/// GET /api/now-playing
///
/// Current state as JSON; does not load audio or consume autoplay
pub async fn now_playing(State(state): State<AppState>) -> Json<NowPlaying> {
    let session = state.session.lock().await;
    Json(session.now_playing(&state.library))
}

async fn apply(state: &AppState, event: PlayerEvent) -> Result<Redirect, ApiError> {
    let mut session = state.session.lock().await;
    session.apply(event, &state.library)?;
    Ok(Redirect::to("/"))
}

/// POST /playlist
pub async fn select_playlist(
    State(state): State<AppState>,
    form: Result<Form<PlaylistForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    apply(&state, PlayerEvent::SelectPlaylist(form.name)).await
}

/// POST /previous
pub async fn previous(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    apply(&state, PlayerEvent::Previous).await
}

/// POST /next
pub async fn next(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    apply(&state, PlayerEvent::Next).await
}

/// POST /play/:index
pub async fn play_index(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> Result<Redirect, ApiError> {
    let Path(index) = index?;
    apply(&state, PlayerEvent::SelectIndex(index)).await
}

/// POST /track-end
///
/// Sent by the page when the audio element finishes
pub async fn track_end(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    apply(&state, PlayerEvent::TrackEnded).await
}
