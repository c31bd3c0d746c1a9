//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use accounthub_auth::SessionCredential;
use accounthub_entity::api_token::ApiToken;
use accounthub_entity::notification::{NotificationChannel, NotificationTarget};
use accounthub_entity::user::{AuthProvider, User};
use accounthub_service::IssuedApiToken;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login and refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session token for the `Authorization: Bearer` header.
    pub token: String,
    /// When the token stops resolving.
    pub expire: DateTime<Utc>,
}

impl From<SessionCredential> for LoginResponse {
    fn from(credential: SessionCredential) -> Self {
        Self {
            token: credential.token,
            expire: credential.expires_at,
        }
    }
}

/// User profile. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Display name.
    pub display_name: String,
    /// Email.
    pub email: String,
    /// Credential provider.
    pub provider: AuthProvider,
    /// Avatar URL.
    pub image: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            provider: user.provider,
            image: user.image,
            created_at: user.created_at,
        }
    }
}

/// API token. The secret value is only present in the creation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTokenResponse {
    /// Token ID.
    pub id: i64,
    /// Token name.
    pub name: String,
    /// Token value, shown once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ApiTokenResponse {
    /// Full view including the secret, for the creation response.
    pub fn created(issued: IssuedApiToken) -> Self {
        Self {
            token: Some(issued.token),
            ..Self::listed(issued.record)
        }
    }

    /// Listing view without the secret.
    pub fn listed(token: ApiToken) -> Self {
        Self {
            id: token.id,
            name: token.name,
            token: None,
            created_at: token.created_at,
        }
    }
}

/// The caller's notification target; `channel` is `None` when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetResponse {
    /// Delivery channel.
    #[serde(rename = "type")]
    pub channel: Option<NotificationChannel>,
}

impl From<Option<NotificationTarget>> for TargetResponse {
    fn from(target: Option<NotificationTarget>) -> Self {
        Self {
            channel: target.map(|t| t.channel),
        }
    }
}
