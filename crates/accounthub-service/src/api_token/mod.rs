//! Long-lived API tokens.

pub mod manager;

pub use manager::{ApiTokenManager, IssuedApiToken};
