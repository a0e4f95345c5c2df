//! Audio download and artwork serving

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use streamify_common::media::artwork_key;
use streamify_common::song_info::{audio_mime_type, current_id};
use streamify_common::Error;
use tracing::debug;

use super::ApiError;
use crate::AppState;

/// Missing files are 404s; anything else is a server error
fn media_error(what: &str, id: &str, e: std::io::Error) -> ApiError {
    match e.kind() {
        std::io::ErrorKind::NotFound => not_found(what, id),
        _ => ApiError(Error::Io(e)),
    }
}

fn not_found(what: &str, id: &str) -> ApiError {
    ApiError(Error::NotFound(format!("{} for {}", what, id)))
}

/// GET /download
///
/// Current song's audio file as an attachment
pub async fn download_current(State(state): State<AppState>) -> Result<Response, ApiError> {
    let id = {
        let session = state.session.lock().await;
        current_id(session.state(), state.library.playlists())
            .map(str::to_string)
            .ok_or_else(|| ApiError(Error::NotFound("no current song".to_string())))?
    };

    let path = state
        .media
        .audio_path(&id)
        .ok_or_else(|| not_found("audio", &id))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| media_error("audio", &id, e))?;
    debug!("Serving download of {} ({} bytes)", id, bytes.len());

    let filename = std::path::Path::new(&id)
        .file_name()
        .map_or_else(|| id.clone(), |n| n.to_string_lossy().into_owned());
    let disposition = format!(
        "attachment; filename=\"{}\"",
        filename.replace(['"', '\\'], "_")
    );
    Ok((
        [
            (header::CONTENT_TYPE, audio_mime_type(&id)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// GET /artwork/:id
///
/// Cover image for a song id
pub async fn artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .media
        .artwork_path(&id)
        .ok_or_else(|| not_found("artwork", &id))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| media_error("artwork", &id, e))?;

    let content_type = mime_guess::from_path(artwork_key(&id))
        .first_or(mime_guess::mime::IMAGE_JPEG)
        .to_string();
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
