//! Mapping of player errors to HTTP responses

use axum::{
    extract::rejection::{FormRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use streamify_common::Error;
use tracing::{error, warn};

/// Handler error carrying the status it should produce
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(Error::InvalidRequest(rejection.body_text()))
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self(Error::InvalidRequest(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            Error::UnknownPlaylist(_) | Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::IndexOutOfRange { .. } | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Rejected request: {}", self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
