//! Route definitions for the AccountHub HTTP API.
//!
//! All routes are mounted under `/api/v1`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unauthenticated endpoints: signup, login, refresh, password reset.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", get(handlers::auth::refresh))
        .route("/auth/reset", post(handlers::auth::request_reset))
        .route("/auth/password", post(handlers::auth::redeem_reset))
}

/// Bearer-protected self-service endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", get(handlers::user::get_profile))
        .route(
            "/users/tokens",
            post(handlers::user::create_token).get(handlers::user::list_tokens),
        )
        .route("/users/tokens/{id}", delete(handlers::user::delete_token))
        .route(
            "/users/targets",
            get(handlers::user::get_target).put(handlers::user::update_target),
        )
        .route("/users/change_password", put(handlers::user::change_password))
}
