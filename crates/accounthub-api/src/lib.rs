//! # accounthub-api
//!
//! HTTP API layer for AccountHub built on Axum.
//!
//! A thin boundary over the services: bearer extraction, request
//! validation, error-to-status mapping, and route wiring.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
