//! HTTP API handlers for streamify-ui

pub mod error;
pub mod health;
pub mod media;
pub mod player;
pub mod ui;

pub use error::ApiError;
pub use health::health_routes;
pub use media::{artwork, download_current};
pub use player::{next, now_playing, play_index, player_page, previous, select_playlist, track_end};
pub use ui::serve_player_css;
