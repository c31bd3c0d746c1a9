//! Notification delivery entities.

pub mod channel;
pub mod target;

pub use channel::NotificationChannel;
pub use target::NotificationTarget;
