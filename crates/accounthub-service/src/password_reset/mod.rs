//! Email-based password reset and authenticated password change.

pub mod code;
pub mod flow;

pub use code::ResetCode;
pub use flow::PasswordResetFlow;
