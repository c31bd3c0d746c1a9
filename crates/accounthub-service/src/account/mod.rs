//! Signup, profile, and account status.

pub mod service;

pub use service::{AccountService, SignupRequest};
