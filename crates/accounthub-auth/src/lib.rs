//! # accounthub-auth
//!
//! Credential primitives and session authentication for AccountHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing with a distinguished mismatch outcome, and length policy
//! - `token`: cryptographically random opaque and derived tokens
//! - `jwt`: HS256 session claims, encoding, and signature verification
//! - `session`: the [`SessionAuthenticator`] interface and its JWT implementation

pub mod jwt;
pub mod password;
pub mod session;
pub mod token;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator, Verification};
pub use session::{
    AuthMode, Credentials, DelegatedIdentity, JwtSessionAuthenticator, SessionAuthenticator,
    SessionCredential,
};
pub use token::TokenMinter;
