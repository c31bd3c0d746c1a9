//! Password reset by emailed single-use code, and authenticated password
//! change.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use accounthub_auth::password::{PasswordHasher, PasswordValidator};
use accounthub_auth::token::TokenMinter;
use accounthub_core::config::AuthConfig;
use accounthub_core::error::AppError;
use accounthub_core::result::AppResult;
use accounthub_core::traits::EmailSender;
use accounthub_database::store::{PasswordResetStore, RedeemOutcome, UserStore};
use accounthub_entity::password_reset::CreatePasswordReset;

use crate::context::RequestContext;

use super::code::ResetCode;

/// Random bytes in each reset token.
const RESET_TOKEN_BYTES: usize = 32;

/// Issues and redeems password reset codes.
#[derive(Clone)]
pub struct PasswordResetFlow {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Reset request store.
    resets: Arc<dyn PasswordResetStore>,
    /// Outbound email.
    email: Arc<dyn EmailSender>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// How long a reset code stays redeemable.
    ttl: Duration,
}

impl std::fmt::Debug for PasswordResetFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordResetFlow")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl PasswordResetFlow {
    /// Creates a new reset flow.
    pub fn new(
        config: &AuthConfig,
        users: Arc<dyn UserStore>,
        resets: Arc<dyn PasswordResetStore>,
        email: Arc<dyn EmailSender>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            resets,
            email,
            hasher,
            validator,
            ttl: config.reset_token_ttl(),
        }
    }

    /// Starts a reset for `email`.
    ///
    /// Unknown addresses succeed without doing anything, so the response
    /// never reveals which addresses are registered. Provider-backed
    /// accounts fail with `WrongProvider`.
    pub async fn request_reset(&self, email: &str) -> AppResult<()> {
        self.request_reset_at(email, Utc::now()).await
    }

    /// [`Self::request_reset`] at an explicit instant.
    pub async fn request_reset_at(&self, email: &str, now: DateTime<Utc>) -> AppResult<()> {
        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            debug!("Password reset requested for unregistered address");
            return Ok(());
        };

        if !user.has_local_credentials() {
            return Err(AppError::wrong_provider(format!(
                "This account signs in with {}; use that login instead",
                user.provider
            )));
        }

        let token = TokenMinter::new_opaque_token(RESET_TOKEN_BYTES);
        let request = self
            .resets
            .replace_for_email(&CreatePasswordReset {
                user_id: user.id,
                email: user.email.clone(),
                token_hash: TokenMinter::digest(&token),
                expires_at: now + self.ttl,
            })
            .await?;

        let code = ResetCode::new(user.email.clone(), token).encode();
        if let Err(e) = self.email.send_reset_email(&user.email, &code).await {
            warn!(user_id = user.id, error = %e, "Reset email delivery failed");
            return Err(AppError::delivery_failed(
                "The reset email could not be sent; please request a new one",
            ));
        }

        info!(
            user_id = user.id,
            expires_at = %request.expires_at,
            "Password reset issued"
        );
        Ok(())
    }

    /// Redeems a reset code and sets `new_password`. A code works once.
    pub async fn redeem(&self, code: &str, new_password: &str) -> AppResult<()> {
        self.redeem_at(code, new_password, Utc::now()).await
    }

    /// [`Self::redeem`] at an explicit instant.
    pub async fn redeem_at(
        &self,
        code: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let code = ResetCode::decode(code)?;
        self.validator.validate(new_password)?;

        let password_hash = self.hasher.hash_password_async(new_password).await?;
        let outcome = self
            .resets
            .redeem(&code.email, &TokenMinter::digest(&code.token), &password_hash, now)
            .await?;

        match outcome {
            RedeemOutcome::Redeemed { user_id } => {
                info!(user_id, "Password reset redeemed");
                Ok(())
            }
            RedeemOutcome::Expired => Err(AppError::expired(
                "Reset code has expired; please request a new one",
            )),
            RedeemOutcome::Unknown => Err(AppError::invalid_code("Reset code is invalid")),
        }
    }

    /// Sets a new password for an already-authenticated caller. No code is
    /// involved.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        new_password: &str,
    ) -> AppResult<()> {
        self.validator.validate(new_password)?;

        let password_hash = self.hasher.hash_password_async(new_password).await?;
        self.users
            .update_password(ctx.user_id, &password_hash)
            .await?;

        info!(user_id = ctx.user_id, "Password changed");
        Ok(())
    }
}
