//! Per-user notification delivery target.

pub mod binding;

pub use binding::NotificationTargetBinding;
