//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use accounthub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around a domain [`AppError`].
///
/// Handlers and extractors return this so the response mapping lives in
/// the API crate.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::AuthenticationFailed | ErrorKind::InvalidSession => StatusCode::UNAUTHORIZED,
        ErrorKind::WrongProvider => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::NameConflict | ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::InvalidCode | ErrorKind::Expired | ErrorKind::Validation => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::DeliveryFailed => StatusCode::BAD_GATEWAY,
        ErrorKind::Encoding
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        // System faults never leak their message to the caller.
        let message = if err.kind.is_system_fault() {
            tracing::error!(kind = %err.kind, error = %err, "Internal server error");
            "Internal server error".to_string()
        } else {
            err.message.clone()
        };

        let body = ApiErrorResponse {
            error: err.kind.code().to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::AuthenticationFailed), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::InvalidSession), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::WrongProvider), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::NameConflict), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorKind::Expired), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::DeliveryFailed), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorKind::Encoding), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_system_fault_message_hidden() {
        let response =
            ApiError::from(AppError::database("relation \"users\" does not exist")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ApiErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "DATABASE");
        assert_eq!(body.message, "Internal server error");
    }

    #[tokio::test]
    async fn test_caller_error_message_kept() {
        let err = AppError::name_conflict("Token name 'ci' is already in use");
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ApiErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "NAME_CONFLICT");
        assert!(body.message.contains("'ci'"));
    }
}
