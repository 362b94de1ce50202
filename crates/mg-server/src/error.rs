//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`mg_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on core results.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: mg_core::Error,
}

impl AppError {
    pub fn new(inner: mg_core::Error) -> Self {
        Self { inner }
    }
}

impl From<mg_core::Error> for AppError {
    fn from(e: mg_core::Error) -> Self {
        Self::new(e)
    }
}

impl From<mg_core::validation::ValidationError> for AppError {
    fn from(e: mg_core::validation::ValidationError) -> Self {
        Self::new(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let body = json!({ "error": self.inner.public_message() });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_core::validation::ValidationError;

    #[test]
    fn not_found_produces_404() {
        let err = AppError::new(mg_core::Error::not_found("image", "abc"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_produces_400() {
        let err = AppError::from(ValidationError::UnsupportedType);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn thumbnail_failure_produces_500() {
        let err = AppError::new(mg_core::Error::thumbnail("bad huffman table"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
