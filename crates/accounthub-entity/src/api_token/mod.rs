//! Long-lived API token entities.

pub mod model;

pub use model::{ApiToken, CreateApiToken};
