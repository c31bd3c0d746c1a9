//! Password reset entities.

pub mod model;

pub use model::{CreatePasswordReset, PasswordResetRequest};
