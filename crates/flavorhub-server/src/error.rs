use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use flavorhub_service::ServiceError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The request could not be decoded (malformed JSON, missing or mistyped field).
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("recipe not found: {0}")]
    RecipeNotFound(flavorhub_types::RecipeId),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("store error: {0}")]
    Store(#[from] flavorhub_store::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RecipeNotFound(_) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Invalid(_)) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Contention { .. }) => StatusCode::CONFLICT,
            Self::Service(ServiceError::Store(_))
            | Self::Store(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flavorhub_types::RecipeId;

    #[test]
    fn status_mapping() {
        let invalid = ServerError::Service(ServiceError::Invalid("rating out of range".into()));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let missing = ServerError::Service(ServiceError::NotFound(RecipeId::new(9)));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let busy = ServerError::Service(ServiceError::Contention {
            id: RecipeId::new(1),
            attempts: 16,
        });
        assert_eq!(busy.status(), StatusCode::CONFLICT);

        assert_eq!(ServerError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServerError::Internal("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn service_message_passes_through() {
        let err = ServerError::from(ServiceError::NotFound(RecipeId::new(999)));
        assert_eq!(err.to_string(), "recipe not found: 999");
    }
}
