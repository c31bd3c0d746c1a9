//! # accounthub-service
//!
//! Use-case services for AccountHub. Each service orchestrates the account
//! store, the credential primitives from `accounthub-auth`, and external
//! collaborators such as email delivery.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod api_token;
pub mod context;
pub mod notification;
pub mod password_reset;

pub use account::{AccountService, SignupRequest};
pub use api_token::{ApiTokenManager, IssuedApiToken};
pub use context::RequestContext;
pub use notification::NotificationTargetBinding;
pub use password_reset::{PasswordResetFlow, ResetCode};
