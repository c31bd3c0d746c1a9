//! Cryptographically random token generation.

use chrono::Utc;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Smallest number of random bytes any token may carry (128 bits).
pub const MIN_TOKEN_BYTES: usize = 16;

/// Generates opaque tokens from the operating system's secure random source.
///
/// Every function here panics if the random source fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenMinter;

impl TokenMinter {
    /// Returns `byte_length` random bytes, hex encoded.
    ///
    /// Lengths below [`MIN_TOKEN_BYTES`] are raised to it.
    pub fn new_opaque_token(byte_length: usize) -> String {
        hex::encode(random_bytes(byte_length.max(MIN_TOKEN_BYTES)))
    }

    /// Returns a token bound to `seed` (for example a username).
    ///
    /// The token is the hex SHA-256 of `seed`, the current time, and a fresh
    /// random salt, so it can never be precomputed from the seed alone.
    pub fn new_derived_token(seed: &str) -> String {
        let salt = hex::encode(random_bytes(MIN_TOKEN_BYTES));
        let material = format!(
            "{seed}:{}:{salt}",
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        Self::digest(&material)
    }

    /// Hex SHA-256 of a token, used to store secrets that only need
    /// to be matched, never read back.
    pub fn digest(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    if let Err(e) = OsRng.try_fill_bytes(&mut buf) {
        panic!("secure random source unavailable: {e}");
    }
    buf
}
