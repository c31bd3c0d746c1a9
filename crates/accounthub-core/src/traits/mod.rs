//! Collaborator traits defined in `accounthub-core` and implemented by other crates.

pub mod email;

pub use email::EmailSender;

#[cfg(any(test, feature = "test-util"))]
pub use email::MockEmailSender;
