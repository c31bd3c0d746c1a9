//! Session authentication: login modes, credential issuance, and resolution.

pub mod authenticator;
pub mod mode;

pub use authenticator::{JwtSessionAuthenticator, SessionAuthenticator, SessionCredential};
pub use mode::{AuthMode, Credentials, DelegatedIdentity};
