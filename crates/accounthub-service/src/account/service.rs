//! Account lifecycle: signup, profile lookup, and enable/disable.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::ValidateEmail;

use accounthub_auth::password::{PasswordHasher, PasswordValidator};
use accounthub_core::error::AppError;
use accounthub_core::result::AppResult;
use accounthub_database::store::UserStore;
use accounthub_entity::user::{AuthProvider, CreateUser, User};

use crate::context::RequestContext;

/// Shortest accepted username.
pub const USERNAME_MIN_LENGTH: usize = 4;
/// Longest accepted username.
pub const USERNAME_MAX_LENGTH: usize = 20;

/// Data for creating a local account.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Desired username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Email address.
    pub email: String,
    /// Display name; defaults to the username.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Handles account creation and account-level state.
#[derive(Clone)]
pub struct AccountService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Registers a local account.
    ///
    /// Fails with `Conflict` if the username or email is already taken,
    /// without saying which.
    pub async fn signup(&self, req: SignupRequest) -> AppResult<User> {
        let username = req.username.trim();
        validate_username(username)?;

        let email = req.email.trim();
        if !email.validate_email() {
            return Err(AppError::validation("Invalid email format"));
        }

        self.validator.validate(&req.password)?;

        let display_name = req
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(username);

        let password_hash = self.hasher.hash_password_async(&req.password).await?;

        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                display_name: display_name.to_string(),
                email: email.to_string(),
                password_hash,
                provider: AuthProvider::Local,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User signed up");

        Ok(user)
    }

    /// Gets the current user's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Disables or re-enables an account. A disabled account cannot log in
    /// and its outstanding sessions stop resolving.
    pub async fn set_disabled(&self, user_id: i64, disabled: bool) -> AppResult<User> {
        let user = self.users.set_disabled(user_id, disabled).await?;
        info!(user_id = user.id, disabled, "Account status changed");
        Ok(user)
    }
}

fn validate_username(username: &str) -> AppResult<()> {
    let length = username.chars().count();
    if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
        return Err(AppError::validation(format!(
            "Username must be between {USERNAME_MIN_LENGTH} and {USERNAME_MAX_LENGTH} characters"
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(AppError::validation(
            "Username may only contain letters, digits, '_', '-' and '.'",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use accounthub_auth::password::Verification;
    use accounthub_core::config::AuthConfig;
    use accounthub_core::error::ErrorKind;
    use accounthub_database::MemoryAccountStore;

    fn service() -> (AccountService, MemoryAccountStore) {
        let cfg = AuthConfig {
            hash_memory_kib: 1024,
            hash_iterations: 1,
            ..AuthConfig::default()
        };
        let store = MemoryAccountStore::new();
        let service = AccountService::new(
            Arc::new(store.clone()),
            Arc::new(PasswordHasher::new(&cfg).unwrap()),
            Arc::new(PasswordValidator::new(&cfg)),
        );
        (service, store)
    }

    fn alice() -> SignupRequest {
        SignupRequest {
            username: "alice".to_string(),
            password: "password123".to_string(),
            email: "a@x.com".to_string(),
            display_name: None,
        }
    }

    #[tokio::test]
    async fn test_signup_hashes_password() {
        let (service, _) = service();
        let user = service.signup(alice()).await.unwrap();

        assert_eq!(user.display_name, "alice");
        assert_ne!(user.password_hash, "password123");
        let hasher = PasswordHasher::new(&AuthConfig {
            hash_memory_kib: 1024,
            hash_iterations: 1,
            ..AuthConfig::default()
        })
        .unwrap();
        assert_eq!(
            hasher
                .verify_password(&user.password_hash, "password123")
                .unwrap(),
            Verification::Matched
        );
    }

    #[tokio::test]
    async fn test_signup_conflict_does_not_name_field() {
        let (service, _) = service();
        service.signup(alice()).await.unwrap();

        let same_name = service
            .signup(SignupRequest {
                email: "other@x.com".to_string(),
                ..alice()
            })
            .await
            .unwrap_err();
        let same_email = service
            .signup(SignupRequest {
                username: "alice2".to_string(),
                ..alice()
            })
            .await
            .unwrap_err();

        assert_eq!(same_name.kind, ErrorKind::Conflict);
        assert_eq!(same_email.kind, ErrorKind::Conflict);
        assert_eq!(same_name.message, same_email.message);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let (service, _) = service();
        for req in [
            SignupRequest {
                username: "abc".to_string(),
                ..alice()
            },
            SignupRequest {
                username: "<script>".to_string(),
                ..alice()
            },
            SignupRequest {
                password: "short".to_string(),
                ..alice()
            },
            SignupRequest {
                email: "not-an-email".to_string(),
                ..alice()
            },
        ] {
            let err = service.signup(req).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
    }

    #[tokio::test]
    async fn test_signup_rejects_malformed_email() {
        let (service, store) = service();
        for (i, email) in ["a b@@x.com", "x@.", "<script>@x.y", "@x.com"]
            .into_iter()
            .enumerate()
        {
            let err = service
                .signup(SignupRequest {
                    username: format!("user{i}"),
                    email: email.to_string(),
                    ..alice()
                })
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "accepted {email:?}");
        }
        assert!(UserStore::find_by_email(&store, "x@.").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_profile_and_disable() {
        let (service, _) = service();
        let user = service.signup(alice()).await.unwrap();
        let ctx = RequestContext::for_user(&user);

        assert_eq!(service.profile(&ctx).await.unwrap().username, "alice");

        let disabled = service.set_disabled(user.id, true).await.unwrap();
        assert!(!disabled.can_login());

        let err = service.set_disabled(9999, true).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
