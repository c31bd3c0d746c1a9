//! User self-service handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::request::{CreateTokenRequest, PasswordRequest, UpdateTargetRequest};
use crate::dto::response::{
    ApiResponse, ApiTokenResponse, MessageResponse, TargetResponse, UserResponse,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.accounts.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/v1/users/tokens
pub async fn create_token(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateTokenRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ApiTokenResponse>>)> {
    let token = state.api_tokens.issue(&auth, &req.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ApiTokenResponse::created(token))),
    ))
}

/// GET /api/v1/users/tokens
pub async fn list_tokens(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<ApiTokenResponse>>>> {
    let tokens = state.api_tokens.list(&auth).await?;
    Ok(Json(ApiResponse::ok(
        tokens.into_iter().map(ApiTokenResponse::listed).collect(),
    )))
}

/// DELETE /api/v1/users/tokens/{id}
pub async fn delete_token(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(token_id): Path<i64>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.api_tokens.revoke(&auth, token_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Token deleted"))))
}

/// GET /api/v1/users/targets
pub async fn get_target(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<TargetResponse>>> {
    let target = state.notification_targets.target(&auth).await?;
    Ok(Json(ApiResponse::ok(target.into())))
}

/// PUT /api/v1/users/targets
pub async fn update_target(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateTargetRequest>,
) -> ApiResult<Json<ApiResponse<TargetResponse>>> {
    let target = state
        .notification_targets
        .update_target(&auth, req.channel)
        .await?;
    Ok(Json(ApiResponse::ok(target.into())))
}

/// PUT /api/v1/users/change_password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<PasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .password_resets
        .change_password(&auth, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password changed"))))
}
