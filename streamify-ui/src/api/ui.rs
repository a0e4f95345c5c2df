//! Static asset routes

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const PLAYER_CSS: &str = include_str!("../../ui/player.css");

/// GET /static/player.css
pub async fn serve_player_css() -> Response {
    (
        StatusCode::OK,
        [("content-type", "text/css")],
        PLAYER_CSS,
    )
        .into_response()
}
