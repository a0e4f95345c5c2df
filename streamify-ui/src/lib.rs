//! streamify-ui library - web player
//!
//! One HTML page showing the current song, transport controls and the song
//! listing of the active playlist. Each action is a form POST that mutates
//! the session and redirects back to the page.

use axum::Router;
use std::sync::Arc;
use streamify_common::media::FsMediaStore;
use streamify_common::{Library, PlayerSession};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod render;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog and playlists, loaded once at startup
    pub library: Arc<Library>,
    /// Audio and artwork files under the root folder
    pub media: Arc<FsMediaStore>,
    /// Playback session; held for a whole apply or render pass
    pub session: Arc<Mutex<PlayerSession>>,
}

impl AppState {
    /// Create new application state with a fresh session
    pub fn new(library: Library) -> Self {
        let media = FsMediaStore::new(library.paths());
        Self {
            library: Arc::new(library),
            media: Arc::new(media),
            session: Arc::new(Mutex::new(PlayerSession::new())),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let actions = Router::new()
        .route("/playlist", post(api::select_playlist))
        .route("/previous", post(api::previous))
        .route("/next", post(api::next))
        .route("/play/:index", post(api::play_index))
        .route("/track-end", post(api::track_end));

    let pages = Router::new()
        .route("/", get(api::player_page))
        .route("/download", get(api::download_current))
        .route("/artwork/:id", get(api::artwork))
        .route("/static/player.css", get(api::serve_player_css))
        .route("/api/now-playing", get(api::now_playing))
        .merge(api::health_routes());

    Router::new()
        .merge(actions)
        .merge(pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
