//! Bearer credential extraction and resolution to a request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use accounthub_core::error::{AppError, ErrorKind};
use accounthub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The raw credential from an `Authorization: Bearer <token>` header.
#[derive(Clone)]
pub struct BearerToken(pub String);

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::invalid_session("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::invalid_session("Invalid Authorization header format"))?;

        Ok(Self(token.to_string()))
    }
}

/// Extracted authenticated user context available in handlers.
///
/// Accepts either a session JWT or a long-lived API token. JWTs always
/// contain `.` separators; API tokens are plain hex.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        let user = if token.contains('.') {
            state.authenticator.resolve(&token).await?
        } else {
            state
                .api_tokens
                .authenticate(&token)
                .await
                .map_err(|e| match e.kind {
                    ErrorKind::AuthenticationFailed => {
                        AppError::invalid_session("Invalid API token")
                    }
                    _ => e,
                })?
        };

        if !state.authenticator.authorize(&user) {
            debug!(user_id = user.id, "Identity not authorized");
            return Err(AppError::invalid_session("Not authorized").into());
        }

        Ok(AuthUser(RequestContext::for_user(&user)))
    }
}
