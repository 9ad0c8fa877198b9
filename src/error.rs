use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Failure reported by the identity provider or the row store, surfaced verbatim.
    #[error("{0}")]
    Downstream(String),

    /// A server secret or setting required by the operation is absent.
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// Re-labels a backend failure as a downstream error, keeping its message.
    ///
    /// Client-side errors (validation, auth, not found) pass through untouched.
    pub fn into_downstream(self) -> Self {
        match self {
            AppError::Database(e) => AppError::Downstream(e.to_string()),
            AppError::Internal(msg) => AppError::Downstream(msg),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Downstream(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Database(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downstream_keeps_backend_message() {
        let err = AppError::Internal("duplicate key value".to_string()).into_downstream();
        assert!(matches!(err, AppError::Downstream(ref m) if m == "duplicate key value"));
    }

    #[test]
    fn downstream_leaves_client_errors_alone() {
        let err = AppError::Forbidden("not allowed".to_string()).into_downstream();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            AppError::Downstream("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Configuration("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Validation("x".into()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
