//! # accounthub-core
//!
//! Core crate for AccountHub. Contains configuration schemas, the unified
//! error system, and the traits for external collaborators (email delivery).
//!
//! This crate has **no** internal dependencies on other AccountHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
