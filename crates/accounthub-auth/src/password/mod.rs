//! Password hashing and policy enforcement.

pub mod hasher;
pub mod validator;

pub use hasher::{PasswordHasher, Verification};
pub use validator::PasswordValidator;
