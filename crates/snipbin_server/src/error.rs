//! Mapping of application errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use snipbin_core::AppError;

/// Error returned by handlers: a status plus a client-safe message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    /// Build an error with an explicit status and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 404 with the generic not-found message.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(err) => {
                tracing::info!("Rejected snippet input: {}", err);
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::NotFound(id) => {
                tracing::debug!("Snippet {} not found", id);
                Self::not_found()
            }
            AppError::Generation(_) | AppError::Store(_) => {
                tracing::error!("Service error: {}", err);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipbin_core::{StoreError, ValidationError};

    #[test]
    fn validation_errors_are_400_with_their_message() {
        let err = HttpError::from(AppError::from(ValidationError::UnsupportedMode(
            "cobol".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Unsupported mode 'cobol'");
    }

    #[test]
    fn service_errors_are_opaque_500s() {
        let store_err = AppError::Store(StoreError::Malformed {
            id: "abc".to_string(),
            field: "timeCreated",
            value: "secret-internal-detail".to_string(),
        });
        for err in [store_err, AppError::Generation("entropy exhausted".to_string())] {
            let http = HttpError::from(err);
            assert_eq!(http.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(http.message(), "Internal server error");
        }
    }

    #[test]
    fn not_found_is_404() {
        let err = HttpError::from(AppError::NotFound("abc".to_string()));
        assert_eq!(err, HttpError::not_found());
    }
}
