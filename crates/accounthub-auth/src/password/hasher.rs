//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tokio::task;

use accounthub_core::config::AuthConfig;
use accounthub_core::error::{AppError, ErrorKind};
use accounthub_core::result::AppResult;

/// Outcome of checking a candidate password against a stored hash.
///
/// A wrong password is a normal outcome, not an error. Callers turn
/// [`Verification::Mismatch`] into a uniform authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The candidate matches the stored hash.
    Matched,
    /// The candidate does not match.
    Mismatch,
}

impl Verification {
    /// Returns `true` for [`Verification::Matched`].
    pub fn is_match(self) -> bool {
        matches!(self, Self::Matched)
    }
}

/// Handles password hashing and verification using Argon2id.
///
/// The work factor comes from [`AuthConfig`]; verification always uses the
/// parameters recorded in the stored PHC string, so hashes created under an
/// older work factor keep verifying after it is raised.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Argon2 cost parameters for new hashes.
    params: Params,
    /// Hash of a random throwaway password, verified against when the
    /// account does not exist so both paths cost the same.
    decoy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher with the configured work factor.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let params = Params::new(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            decoy_hash: String::new(),
        };
        let decoy = SaltString::generate(&mut OsRng);
        hasher.decoy_hash = hasher.hash_password(decoy.as_str())?;
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Encoding, "Password hashing failed", e)
            })?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns an `Encoding` error only when the stored hash is malformed.
    pub fn verify_password(&self, stored_hash: &str, candidate: &str) -> AppResult<Verification> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            AppError::with_source(ErrorKind::Encoding, "Stored password hash is malformed", e)
        })?;

        match self
            .argon2()
            .verify_password(candidate.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(Verification::Matched),
            Err(argon2::password_hash::Error::Password) => Ok(Verification::Mismatch),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Encoding,
                "Password verification failed",
                e,
            )),
        }
    }

    /// Spends one verification on the decoy hash. Always a mismatch.
    pub fn verify_decoy(&self, candidate: &str) {
        let _ = self.verify_password(&self.decoy_hash, candidate);
    }

    /// [`Self::hash_password`] on the blocking thread pool, so the Argon2
    /// work never stalls an async worker.
    pub async fn hash_password_async(&self, password: &str) -> AppResult<String> {
        let hasher = self.clone();
        let password = password.to_string();
        task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Password hashing task failed", e)
            })?
    }

    /// [`Self::verify_password`] on the blocking thread pool.
    pub async fn verify_password_async(
        &self,
        stored_hash: &str,
        candidate: &str,
    ) -> AppResult<Verification> {
        let hasher = self.clone();
        let stored_hash = stored_hash.to_string();
        let candidate = candidate.to_string();
        task::spawn_blocking(move || hasher.verify_password(&stored_hash, &candidate))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Password verification task failed", e)
            })?
    }

    /// [`Self::verify_decoy`] on the blocking thread pool.
    pub async fn verify_decoy_async(&self, candidate: &str) {
        let hasher = self.clone();
        let candidate = candidate.to_string();
        let _ = task::spawn_blocking(move || hasher.verify_decoy(&candidate)).await;
    }
}
