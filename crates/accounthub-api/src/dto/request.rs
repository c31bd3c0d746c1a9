//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use accounthub_entity::notification::NotificationChannel;
use accounthub_service::SignupRequest as SvcSignupRequest;

/// Signup request body.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Username.
    #[validate(length(min = 4, max = 20, message = "Username must be 4-20 characters"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<SignupRequest> for SvcSignupRequest {
    fn from(req: SignupRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            email: req.email,
            display_name: req.display_name,
        }
    }
}

/// Login request body.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Password reset request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetRequest {
    /// Address to send the reset link to.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Query string of the reset link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetCodeQuery {
    /// Encoded reset code.
    pub c: String,
}

/// New password body, used by reset redemption and password change.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct PasswordRequest {
    /// New password. Length policy is enforced by the service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl std::fmt::Debug for PasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordRequest").finish_non_exhaustive()
    }
}

/// API token creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTokenRequest {
    /// Token name.
    #[validate(length(min = 1, max = 64, message = "Token name must be 1-64 characters"))]
    pub name: String,
}

/// Notification target update body. `none` removes the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTargetRequest {
    /// Delivery channel.
    #[serde(rename = "type")]
    pub channel: NotificationChannel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_rules() {
        let mut req = SignupRequest {
            username: "alice".to_string(),
            password: "password1".to_string(),
            email: "a@x.com".to_string(),
            display_name: None,
        };
        assert!(req.validate().is_ok());

        req.username = "abc".to_string();
        assert!(req.validate().is_err());

        req.username = "alice".to_string();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_target_uses_type_field() {
        let req: UpdateTargetRequest = serde_json::from_str(r#"{"type":"webhook"}"#).unwrap();
        assert_eq!(req.channel, NotificationChannel::Webhook);
    }

    #[test]
    fn test_debug_hides_password() {
        let req = LoginRequest {
            username: "alice".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(!format!("{req:?}").contains("hunter22"));
    }
}
