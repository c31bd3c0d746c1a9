//! In-memory account store using a Tokio mutex.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use accounthub_core::error::AppError;
use accounthub_core::result::AppResult;
use accounthub_entity::api_token::{ApiToken, CreateApiToken};
use accounthub_entity::notification::{NotificationChannel, NotificationTarget};
use accounthub_entity::password_reset::{CreatePasswordReset, PasswordResetRequest};
use accounthub_entity::user::{CreateUser, User};

use crate::store::{
    ApiTokenStore, NotificationTargetStore, PasswordResetStore, RedeemOutcome, UserStore,
};

/// A scheduled notification as seen by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNotification {
    /// Row identifier.
    pub id: i64,
    /// Recipient.
    pub user_id: i64,
    /// Channel the notification will be delivered through.
    pub channel: NotificationChannel,
    /// Whether the notification has already gone out.
    pub is_sent: bool,
}

#[derive(Debug, Default)]
struct InnerState {
    next_id: i64,
    users: HashMap<i64, User>,
    api_tokens: Vec<ApiToken>,
    resets: Vec<PasswordResetRequest>,
    targets: HashMap<i64, NotificationTarget>,
    notifications: Vec<PendingNotification>,
}

impl InnerState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Account store that keeps every table in a single mutex-protected state.
///
/// Every trait operation runs inside one critical section, so compound
/// operations such as [`PasswordResetStore::redeem`] are atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a notification for `user_id` on `channel`. Returns its id.
    pub async fn schedule_notification(&self, user_id: i64, channel: NotificationChannel) -> i64 {
        let mut state = self.state.lock().await;
        let id = state.allocate_id();
        state.notifications.push(PendingNotification {
            id,
            user_id,
            channel,
            is_sent: false,
        });
        id
    }

    /// Mark a scheduled notification as delivered.
    pub async fn mark_sent(&self, notification_id: i64) {
        let mut state = self.state.lock().await;
        if let Some(n) = state
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
        {
            n.is_sent = true;
        }
    }

    /// All notifications scheduled for a user, in scheduling order.
    pub async fn notifications_for(&self, user_id: i64) -> Vec<PendingNotification> {
        let state = self.state.lock().await;
        state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl UserStore for MemoryAccountStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;

        let taken = state.users.values().any(|u| {
            u.username == data.username || u.email.eq_ignore_ascii_case(&data.email)
        });
        if taken {
            return Err(AppError::conflict("Username or email is already registered"));
        }

        let now = Utc::now();
        let user = User {
            id: state.allocate_id(),
            username: data.username.clone(),
            display_name: data.display_name.clone(),
            email: data.email.clone(),
            provider: data.provider,
            password_hash: data.password_hash.clone(),
            image: None,
            disabled: false,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        debug!(user_id = user.id, username = %user.username, "User stored in memory");
        Ok(user)
    }

    async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_disabled(&self, user_id: i64, disabled: bool) -> AppResult<User> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.disabled = disabled;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl ApiTokenStore for MemoryAccountStore {
    async fn create(&self, data: &CreateApiToken) -> AppResult<ApiToken> {
        let mut state = self.state.lock().await;

        if state.api_tokens.iter().any(|t| t.name == data.name) {
            return Err(AppError::name_conflict(format!(
                "Token name '{}' is already in use",
                data.name
            )));
        }

        let token = ApiToken {
            id: state.allocate_id(),
            user_id: data.user_id,
            name: data.name.clone(),
            token_hash: data.token_hash.clone(),
            created_at: Utc::now(),
        };
        state.api_tokens.push(token.clone());
        Ok(token)
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<ApiToken>> {
        let state = self.state.lock().await;
        Ok(state
            .api_tokens
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<ApiToken>> {
        let state = self.state.lock().await;
        Ok(state
            .api_tokens
            .iter()
            .find(|t| t.token_hash == token_hash)
            .cloned())
    }

    async fn delete(&self, user_id: i64, token_id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.api_tokens.len();
        state
            .api_tokens
            .retain(|t| !(t.id == token_id && t.user_id == user_id));
        Ok(state.api_tokens.len() < before)
    }
}

#[async_trait]
impl PasswordResetStore for MemoryAccountStore {
    async fn replace_for_email(
        &self,
        data: &CreatePasswordReset,
    ) -> AppResult<PasswordResetRequest> {
        let mut state = self.state.lock().await;
        state
            .resets
            .retain(|r| !r.email.eq_ignore_ascii_case(&data.email));

        let request = PasswordResetRequest {
            id: state.allocate_id(),
            user_id: data.user_id,
            email: data.email.clone(),
            token_hash: data.token_hash.clone(),
            expires_at: data.expires_at,
        };
        state.resets.push(request.clone());
        Ok(request)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Vec<PasswordResetRequest>> {
        let state = self.state.lock().await;
        let mut found: Vec<_> = state
            .resets
            .iter()
            .filter(|r| r.email.eq_ignore_ascii_case(email))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(found)
    }

    async fn redeem(
        &self,
        email: &str,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<RedeemOutcome> {
        let mut state = self.state.lock().await;

        let Some(pos) = state
            .resets
            .iter()
            .position(|r| r.email.eq_ignore_ascii_case(email) && r.token_hash == token_hash)
        else {
            return Ok(RedeemOutcome::Unknown);
        };

        let request = state.resets.remove(pos);
        if request.is_expired_at(now) {
            return Ok(RedeemOutcome::Expired);
        }

        match state.users.get_mut(&request.user_id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = now;
                Ok(RedeemOutcome::Redeemed {
                    user_id: request.user_id,
                })
            }
            None => Ok(RedeemOutcome::Unknown),
        }
    }
}

#[async_trait]
impl NotificationTargetStore for MemoryAccountStore {
    async fn upsert(
        &self,
        user_id: i64,
        channel: NotificationChannel,
    ) -> AppResult<NotificationTarget> {
        if channel.is_none() {
            return Err(AppError::validation(
                "A 'none' target is represented by deleting the target",
            ));
        }

        let mut state = self.state.lock().await;
        let target = state
            .targets
            .entry(user_id)
            .and_modify(|t| t.channel = channel)
            .or_insert_with(|| NotificationTarget {
                user_id,
                channel,
                created_at: Utc::now(),
            });
        Ok(target.clone())
    }

    async fn delete(&self, user_id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.targets.remove(&user_id).is_some())
    }

    async fn find(&self, user_id: i64) -> AppResult<Option<NotificationTarget>> {
        let state = self.state.lock().await;
        Ok(state.targets.get(&user_id).cloned())
    }

    async fn retarget_pending(
        &self,
        user_id: i64,
        channel: NotificationChannel,
    ) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let mut updated = 0;
        for n in state
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_sent)
        {
            n.channel = channel;
            updated += 1;
        }
        Ok(updated)
    }
}
