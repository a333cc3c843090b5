//! Server error types and HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sitekit_store::{DirectoryError, ImageError, StaleWrite};

/// Request handling error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    #[error("{0}")]
    NotFound(String),

    #[error("unknown section type: {0}")]
    UnknownSectionType(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Stale(#[from] StaleWrite),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnknownSectionType(_) | Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Stale(_) => StatusCode::CONFLICT,
            Self::Directory(_) => StatusCode::BAD_GATEWAY,
            Self::Image(ImageError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Image(ImageError::UnsupportedType(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Image(ImageError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::NotFound("x".to_owned()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::Stale(StaleWrite { expected: 1, actual: 2 }).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServerError::Image(ImageError::UnsupportedType("text/plain".to_owned())).status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ServerError::UnknownSectionType("x".to_owned()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
