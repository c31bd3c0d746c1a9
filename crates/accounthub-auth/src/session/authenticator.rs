//! Session authenticator: login, stateless session issuance, and per-request
//! identity resolution.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use accounthub_core::config::AuthConfig;
use accounthub_core::error::AppError;
use accounthub_core::result::AppResult;
use accounthub_database::store::UserStore;
use accounthub_entity::user::User;

use crate::jwt::{Claims, JwtDecoder, JwtEncoder};
use crate::password::{PasswordHasher, Verification};

use super::mode::{AuthMode, Credentials, DelegatedIdentity};

/// A signed, time-limited session token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    /// The signed token, sent back as `Authorization: Bearer <token>`.
    pub token: String,
    /// When the token stops resolving.
    pub expires_at: DateTime<Utc>,
}

/// Establishes who a caller is. Nothing here decides what they may do.
#[async_trait]
pub trait SessionAuthenticator: Send + Sync + 'static {
    /// Check a login attempt and return the authenticated user.
    ///
    /// Every local-mode failure (unknown user, disabled account, wrong
    /// password) yields the same `AuthenticationFailed` error.
    async fn authenticate(&self, mode: AuthMode) -> AppResult<User>;

    /// Sign a new session credential for an authenticated user.
    fn issue_session(&self, identity: &User) -> AppResult<SessionCredential>;

    /// Turn a session credential back into the live user record.
    async fn resolve(&self, token: &str) -> AppResult<User>;

    /// Exchange a session credential for a fresh one, within the refresh
    /// window of the original login.
    async fn refresh(&self, token: &str) -> AppResult<SessionCredential>;

    /// Binary authorization: any resolved, enabled identity may proceed.
    fn authorize(&self, identity: &User) -> bool;
}

/// [`SessionAuthenticator`] backed by HS256 JWTs and a [`UserStore`].
pub struct JwtSessionAuthenticator {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    max_refresh: Duration,
}

impl std::fmt::Debug for JwtSessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionAuthenticator")
            .field("max_refresh", &self.max_refresh)
            .finish()
    }
}

impl JwtSessionAuthenticator {
    /// Creates an authenticator. The signing secret and time limits are
    /// read once from `config`.
    pub fn new(
        config: &AuthConfig,
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            max_refresh: config.max_refresh(),
        }
    }

    async fn authenticate_local(&self, credentials: Credentials) -> AppResult<User> {
        let Some(user) = self.users.find_by_username(&credentials.username).await? else {
            self.hasher.verify_decoy_async(&credentials.password).await;
            debug!(username = %credentials.username, "Login for unknown user");
            return Err(AppError::authentication_failed());
        };

        // Provider-backed accounts have no usable local hash.
        if !user.has_local_credentials() {
            self.hasher.verify_decoy_async(&credentials.password).await;
            warn!(
                user_id = user.id,
                provider = %user.provider,
                "Password login for provider account"
            );
            return Err(AppError::authentication_failed());
        }

        let verification = self
            .hasher
            .verify_password_async(&user.password_hash, &credentials.password)
            .await?;

        if verification == Verification::Mismatch || !user.can_login() {
            warn!(user_id = user.id, "Login rejected");
            return Err(AppError::authentication_failed());
        }

        info!(user_id = user.id, "User logged in");
        Ok(user)
    }

    fn authenticate_delegated(&self, identity: DelegatedIdentity) -> AppResult<User> {
        let user = identity.into_user();
        if !user.can_login() {
            warn!(user_id = user.id, provider = %user.provider, "Delegated login rejected");
            return Err(AppError::authentication_failed());
        }

        info!(user_id = user.id, provider = %user.provider, "User logged in via provider");
        Ok(user)
    }

    /// [`SessionAuthenticator::issue_session`] at an explicit instant.
    pub fn issue_session_at(
        &self,
        identity: &User,
        now: DateTime<Utc>,
    ) -> AppResult<SessionCredential> {
        let (token, expires_at) = self.encoder.issue(&identity.username, now)?;
        Ok(SessionCredential { token, expires_at })
    }

    /// [`SessionAuthenticator::resolve`] at an explicit instant.
    pub async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<User> {
        let claims = self.decoder.decode(token)?;
        if claims.is_expired_at(now) {
            return Err(AppError::invalid_session("Session has expired"));
        }
        self.load_subject(&claims).await
    }

    /// [`SessionAuthenticator::refresh`] at an explicit instant.
    pub async fn refresh_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<SessionCredential> {
        let claims = self.decoder.decode(token)?;
        if claims.refresh_window_elapsed_at(now, self.max_refresh) {
            return Err(AppError::invalid_session("Session can no longer be refreshed"));
        }

        let user = self.load_subject(&claims).await?;
        let (token, expires_at) = self.encoder.reissue(&claims, now)?;
        debug!(user_id = user.id, "Session refreshed");
        Ok(SessionCredential { token, expires_at })
    }

    async fn load_subject(&self, claims: &Claims) -> AppResult<User> {
        match self.users.find_by_username(claims.username()).await? {
            Some(user) if user.can_login() => Ok(user),
            _ => Err(AppError::invalid_session("Invalid session token")),
        }
    }
}

#[async_trait]
impl SessionAuthenticator for JwtSessionAuthenticator {
    async fn authenticate(&self, mode: AuthMode) -> AppResult<User> {
        match mode {
            AuthMode::Local(credentials) => self.authenticate_local(credentials).await,
            AuthMode::Delegated(identity) => self.authenticate_delegated(identity),
        }
    }

    fn issue_session(&self, identity: &User) -> AppResult<SessionCredential> {
        self.issue_session_at(identity, Utc::now())
    }

    async fn resolve(&self, token: &str) -> AppResult<User> {
        self.resolve_at(token, Utc::now()).await
    }

    async fn refresh(&self, token: &str) -> AppResult<SessionCredential> {
        self.refresh_at(token, Utc::now()).await
    }

    fn authorize(&self, identity: &User) -> bool {
        identity.can_login()
    }
}
