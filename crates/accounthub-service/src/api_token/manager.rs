//! Long-lived API token issuance, listing, revocation, and lookup.

use std::sync::Arc;

use tracing::{info, warn};

use accounthub_auth::token::TokenMinter;
use accounthub_core::error::AppError;
use accounthub_core::result::AppResult;
use accounthub_database::store::{ApiTokenStore, UserStore};
use accounthub_entity::api_token::{ApiToken, CreateApiToken};
use accounthub_entity::user::User;

use crate::context::RequestContext;

/// Longest accepted token name.
pub const TOKEN_NAME_MAX_LENGTH: usize = 64;

/// A freshly issued token together with its value.
///
/// The value is never stored; this is the only place it exists.
#[derive(Clone)]
pub struct IssuedApiToken {
    /// Stored record.
    pub record: ApiToken,
    /// Token value to hand to the caller once.
    pub token: String,
}

impl std::fmt::Debug for IssuedApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedApiToken")
            .field("record", &self.record)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Manages user-scoped bearer tokens that live until explicitly revoked.
#[derive(Clone)]
pub struct ApiTokenManager {
    /// Token store.
    tokens: Arc<dyn ApiTokenStore>,
    /// User store, for resolving token owners.
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for ApiTokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTokenManager").finish_non_exhaustive()
    }
}

impl ApiTokenManager {
    /// Creates a new API token manager.
    pub fn new(tokens: Arc<dyn ApiTokenStore>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// Issues a token named `name` for the caller.
    ///
    /// Names are unique across all users; a clash fails with
    /// `NameConflict` and leaves the existing token untouched.
    pub async fn issue(&self, ctx: &RequestContext, name: &str) -> AppResult<IssuedApiToken> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Token name is required"));
        }
        if name.chars().count() > TOKEN_NAME_MAX_LENGTH {
            return Err(AppError::validation(format!(
                "Token name must be at most {TOKEN_NAME_MAX_LENGTH} characters"
            )));
        }

        let token = TokenMinter::new_derived_token(&ctx.username);
        let record = self
            .tokens
            .create(&CreateApiToken {
                user_id: ctx.user_id,
                name: name.to_string(),
                token_hash: TokenMinter::digest(&token),
            })
            .await?;

        info!(
            user_id = ctx.user_id,
            token_id = record.id,
            name = %record.name,
            "API token issued"
        );

        Ok(IssuedApiToken { record, token })
    }

    /// The caller's tokens in creation order.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<ApiToken>> {
        self.tokens.list_by_user(ctx.user_id).await
    }

    /// Deletes one of the caller's tokens. Tokens owned by someone else are
    /// reported as `NotFound`.
    pub async fn revoke(&self, ctx: &RequestContext, token_id: i64) -> AppResult<()> {
        if !self.tokens.delete(ctx.user_id, token_id).await? {
            return Err(AppError::not_found("API token not found"));
        }

        info!(user_id = ctx.user_id, token_id, "API token revoked");
        Ok(())
    }

    /// Resolves a presented token to its live, enabled owner.
    pub async fn authenticate(&self, token: &str) -> AppResult<User> {
        let Some(record) = self
            .tokens
            .find_by_token_hash(&TokenMinter::digest(token))
            .await?
        else {
            return Err(AppError::authentication_failed());
        };

        match self.users.find_by_id(record.user_id).await? {
            Some(user) if user.can_login() => Ok(user),
            _ => {
                warn!(token_id = record.id, "API token presented for unusable account");
                Err(AppError::authentication_failed())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accounthub_core::error::ErrorKind;
    use accounthub_database::MemoryAccountStore;
    use accounthub_entity::user::{AuthProvider, CreateUser};

    async fn setup() -> (ApiTokenManager, MemoryAccountStore, RequestContext, RequestContext) {
        let store = MemoryAccountStore::new();
        let mut contexts = Vec::new();
        for (username, email) in [("alice", "a@x.com"), ("bobby", "b@x.com")] {
            let user = UserStore::create(
                &store,
                &CreateUser {
                    username: username.to_string(),
                    display_name: username.to_string(),
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    provider: AuthProvider::Local,
                },
            )
            .await
            .unwrap();
            contexts.push(RequestContext::for_user(&user));
        }
        let bob = contexts.pop().unwrap();
        let alice = contexts.pop().unwrap();
        let manager = ApiTokenManager::new(Arc::new(store.clone()), Arc::new(store.clone()));
        (manager, store, alice, bob)
    }

    #[tokio::test]
    async fn test_names_are_unique_across_users() {
        let (manager, _, alice, bob) = setup().await;

        let first = manager.issue(&alice, "ci-bot").await.unwrap();
        let err = manager.issue(&bob, "ci-bot").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NameConflict);

        let owner = manager.authenticate(&first.token).await.unwrap();
        assert_eq!(owner.id, alice.user_id);
    }

    #[tokio::test]
    async fn test_tokens_have_128_bits_or_more() {
        let (manager, _, alice, _) = setup().await;
        let token = manager.issue(&alice, "ci-bot").await.unwrap();
        assert!(token.token.len() >= 32);
        assert!(token.token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let (manager, _, alice, bob) = setup().await;
        manager.issue(&alice, "first").await.unwrap();
        manager.issue(&bob, "other").await.unwrap();
        manager.issue(&alice, "second").await.unwrap();

        let names: Vec<_> = manager
            .list(&alice)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_cannot_revoke_others_tokens() {
        let (manager, _, alice, bob) = setup().await;
        let token = manager.issue(&alice, "ci-bot").await.unwrap();

        let err = manager.revoke(&bob, token.record.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(manager.authenticate(&token.token).await.is_ok());

        manager.revoke(&alice, token.record.id).await.unwrap();
        let err = manager.authenticate(&token.token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthenticationFailed);
    }

    #[tokio::test]
    async fn test_store_keeps_only_digest() {
        let (manager, store, alice, _) = setup().await;
        let issued = manager.issue(&alice, "ci-bot").await.unwrap();

        let stored = store.list_by_user(alice.user_id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].token_hash, TokenMinter::digest(&issued.token));
        assert_ne!(stored[0].token_hash, issued.token);
        assert!(!format!("{:?}", stored[0]).contains(&issued.token));
        assert!(!format!("{issued:?}").contains(&issued.token));

        assert!(manager.authenticate(&stored[0].token_hash).await.is_err());
        assert!(manager.authenticate(&issued.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_disabled_owner_cannot_use_token() {
        let (manager, store, alice, _) = setup().await;
        let token = manager.issue(&alice, "ci-bot").await.unwrap();

        store.set_disabled(alice.user_id, true).await.unwrap();
        let err = manager.authenticate(&token.token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthenticationFailed);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (manager, _, alice, _) = setup().await;
        let err = manager.issue(&alice, "   ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
