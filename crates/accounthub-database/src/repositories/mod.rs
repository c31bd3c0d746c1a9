//! PostgreSQL implementations of the account store traits.

pub mod api_token;
pub mod notification_target;
pub mod password_reset;
pub mod user;

pub use api_token::ApiTokenRepository;
pub use notification_target::NotificationTargetRepository;
pub use password_reset::PasswordResetRepository;
pub use user::UserRepository;
