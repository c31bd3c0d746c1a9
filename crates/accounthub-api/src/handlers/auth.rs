//! Auth handlers: signup, login, refresh, and password reset.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use accounthub_auth::{AuthMode, Credentials};

use crate::dto::request::{
    LoginRequest, PasswordRequest, ResetCodeQuery, ResetRequest, SignupRequest,
};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{BearerToken, ValidatedJson};
use crate::state::AppState;

/// POST /api/v1/auth/
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state.accounts.signup(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let user = state
        .authenticator
        .authenticate(AuthMode::Local(Credentials::new(req.username, req.password)))
        .await?;

    let credential = state.authenticator.issue_session(&user)?;
    Ok(Json(ApiResponse::ok(credential.into())))
}

/// GET /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let credential = state.authenticator.refresh(&token).await?;
    Ok(Json(ApiResponse::ok(credential.into())))
}

/// POST /api/v1/auth/reset
///
/// Answers the same way whether or not the address is registered.
pub async fn request_reset(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ResetRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.password_resets.request_reset(&req.email).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "If the address is registered, a reset link has been sent",
    ))))
}

/// POST /api/v1/auth/password?c={code}
pub async fn redeem_reset(
    State(state): State<AppState>,
    Query(query): Query<ResetCodeQuery>,
    ValidatedJson(req): ValidatedJson<PasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .password_resets
        .redeem(&query.c, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password updated"))))
}
