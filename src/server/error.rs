//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`sp_core::Error`] via the [`AppError`]
//! wrapper so route handlers can return `Result<T, AppError>` directly.
//! Bodies are JSON objects with an `error` key; tool failures additionally
//! carry the captured combined output under `details`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: sp_core::Error,
}

impl AppError {
    pub fn new(inner: sp_core::Error) -> Self {
        Self { inner }
    }
}

impl From<sp_core::Error> for AppError {
    fn from(e: sp_core::Error) -> Self {
        Self::new(e)
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
                "request handler failed"
            );
        }

        let mut body = json!({ "error": self.inner.to_string() });
        if let Some(details) = self.inner.tool_output() {
            body["details"] = details.into();
        }

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_produces_400() {
        let err = AppError::new(sp_core::Error::validation("No file uploaded"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn tool_failure_produces_500() {
        let err = AppError::new(sp_core::Error::tool_with_output(
            "packager",
            "exited with status 1",
            "stderr dump",
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
