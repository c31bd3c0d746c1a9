//! Password reset repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use accounthub_core::error::{AppError, ErrorKind};
use accounthub_core::result::AppResult;
use accounthub_entity::password_reset::{CreatePasswordReset, PasswordResetRequest};

use crate::store::{PasswordResetStore, RedeemOutcome};

/// Repository for single-use password reset requests.
#[derive(Debug, Clone)]
pub struct PasswordResetRepository {
    pool: PgPool,
}

impl PasswordResetRepository {
    /// Create a new password reset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

#[async_trait]
impl PasswordResetStore for PasswordResetRepository {
    async fn replace_for_email(
        &self,
        data: &CreatePasswordReset,
    ) -> AppResult<PasswordResetRequest> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query("DELETE FROM password_resets WHERE LOWER(email) = LOWER($1)")
            .bind(&data.email)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to discard previous reset requests"))?;

        let request = sqlx::query_as::<_, PasswordResetRequest>(
            "INSERT INTO password_resets (user_id, email, token_hash, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.email)
        .bind(&data.token_hash)
        .bind(data.expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to store reset request"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit reset request"))?;

        Ok(request)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Vec<PasswordResetRequest>> {
        sqlx::query_as::<_, PasswordResetRequest>(
            "SELECT * FROM password_resets WHERE LOWER(email) = LOWER($1) ORDER BY id DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list reset requests"))
    }

    async fn redeem(
        &self,
        email: &str,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<RedeemOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // The DELETE takes the row lock; a concurrent redemption blocks here
        // and then sees no row once this transaction commits.
        let consumed: Option<(i64, DateTime<Utc>)> = sqlx::query_as(
            "DELETE FROM password_resets \
             WHERE LOWER(email) = LOWER($1) AND token_hash = $2 \
             RETURNING user_id, expires_at",
        )
        .bind(email)
        .bind(token_hash)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to consume reset request"))?;

        let outcome = match consumed {
            None => RedeemOutcome::Unknown,
            Some((_, expires_at)) if now >= expires_at => RedeemOutcome::Expired,
            Some((user_id, _)) => {
                let result = sqlx::query(
                    "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
                )
                .bind(user_id)
                .bind(password_hash)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to update password"))?;

                if result.rows_affected() == 0 {
                    RedeemOutcome::Unknown
                } else {
                    RedeemOutcome::Redeemed { user_id }
                }
            }
        };

        tx.commit()
            .await
            .map_err(db_error("Failed to commit redemption"))?;

        Ok(outcome)
    }
}
