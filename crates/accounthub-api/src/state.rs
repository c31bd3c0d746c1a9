//! Application state shared across all handlers.

use std::sync::Arc;

use accounthub_auth::{
    JwtSessionAuthenticator, PasswordHasher, PasswordValidator, SessionAuthenticator,
};
use accounthub_core::config::AuthConfig;
use accounthub_core::result::AppResult;
use accounthub_core::traits::EmailSender;
use accounthub_database::{ApiTokenStore, NotificationTargetStore, PasswordResetStore, UserStore};
use accounthub_service::{
    AccountService, ApiTokenManager, NotificationTargetBinding, PasswordResetFlow,
};

/// The account store, one handle per concern.
///
/// A single backend usually implements every trait; the handles are
/// separate so PostgreSQL repositories and the in-memory store plug in the
/// same way.
#[derive(Clone)]
pub struct Stores {
    /// Users.
    pub users: Arc<dyn UserStore>,
    /// API tokens.
    pub api_tokens: Arc<dyn ApiTokenStore>,
    /// Password reset requests.
    pub password_resets: Arc<dyn PasswordResetStore>,
    /// Notification targets.
    pub notification_targets: Arc<dyn NotificationTargetStore>,
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Session login, resolution, and refresh.
    pub authenticator: Arc<dyn SessionAuthenticator>,
    /// Signup and profile.
    pub accounts: Arc<AccountService>,
    /// Long-lived API tokens.
    pub api_tokens: Arc<ApiTokenManager>,
    /// Password reset and change.
    pub password_resets: Arc<PasswordResetFlow>,
    /// Notification target binding.
    pub notification_targets: Arc<NotificationTargetBinding>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("accounts", &self.accounts)
            .field("api_tokens", &self.api_tokens)
            .field("password_resets", &self.password_resets)
            .field("notification_targets", &self.notification_targets)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires every service over the given stores and email sender.
    pub fn build(
        config: &AuthConfig,
        stores: Stores,
        email: Arc<dyn EmailSender>,
    ) -> AppResult<Self> {
        let hasher = Arc::new(PasswordHasher::new(config)?);
        let validator = Arc::new(PasswordValidator::new(config));

        let authenticator = Arc::new(JwtSessionAuthenticator::new(
            config,
            Arc::clone(&stores.users),
            Arc::clone(&hasher),
        ));

        let accounts = Arc::new(AccountService::new(
            Arc::clone(&stores.users),
            Arc::clone(&hasher),
            Arc::clone(&validator),
        ));

        let api_tokens = Arc::new(ApiTokenManager::new(
            Arc::clone(&stores.api_tokens),
            Arc::clone(&stores.users),
        ));

        let password_resets = Arc::new(PasswordResetFlow::new(
            config,
            Arc::clone(&stores.users),
            Arc::clone(&stores.password_resets),
            email,
            hasher,
            validator,
        ));

        let notification_targets = Arc::new(NotificationTargetBinding::new(
            stores.notification_targets,
        ));

        Ok(Self {
            authenticator,
            accounts,
            api_tokens,
            password_resets,
            notification_targets,
        })
    }
}
