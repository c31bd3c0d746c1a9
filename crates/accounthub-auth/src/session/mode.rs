//! Typed login modes.

use accounthub_entity::user::User;

/// A username and password supplied by the client.
#[derive(Clone)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Plaintext password candidate.
    pub password: String,
}

impl Credentials {
    /// Bundle a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An identity already verified by a trusted server-side step, such as a
/// completed single sign-on exchange.
///
/// The only constructor takes a [`User`] record the server has loaded
/// itself. There is no deserialization path, so no request body can ever
/// produce one.
#[derive(Debug, Clone)]
pub struct DelegatedIdentity {
    user: User,
}

impl DelegatedIdentity {
    /// Vouch for a user the server has already authenticated.
    pub fn vouch(user: User) -> Self {
        Self { user }
    }

    pub(crate) fn into_user(self) -> User {
        self.user
    }
}

/// How a caller proves its identity at login.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// Verify a password against the local account store.
    Local(Credentials),
    /// Accept an identity established upstream; no password check.
    Delegated(DelegatedIdentity),
}
