//! Opaque bearer-token generation.

pub mod minter;

pub use minter::{MIN_TOKEN_BYTES, TokenMinter};
