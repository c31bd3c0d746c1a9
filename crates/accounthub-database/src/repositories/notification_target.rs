//! Notification target repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use accounthub_core::error::{AppError, ErrorKind};
use accounthub_core::result::AppResult;
use accounthub_entity::notification::{NotificationChannel, NotificationTarget};

use crate::store::NotificationTargetStore;

/// Repository for per-user notification targets.
#[derive(Debug, Clone)]
pub struct NotificationTargetRepository {
    pool: PgPool,
}

impl NotificationTargetRepository {
    /// Create a new notification target repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationTargetStore for NotificationTargetRepository {
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

        sqlx::query_as::<_, NotificationTarget>(
            "INSERT INTO notification_targets (user_id, channel) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET channel = EXCLUDED.channel \
             RETURNING *",
        )
        .bind(user_id)
        .bind(channel)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update notification target", e)
        })
    }

    async fn delete(&self, user_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notification_targets WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to delete notification target",
                    e,
                )
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn find(&self, user_id: i64) -> AppResult<Option<NotificationTarget>> {
        sqlx::query_as::<_, NotificationTarget>(
            "SELECT * FROM notification_targets WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find notification target", e)
        })
    }

    async fn retarget_pending(
        &self,
        user_id: i64,
        channel: NotificationChannel,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET channel = $2 WHERE user_id = $1 AND is_sent = FALSE",
        )
        .bind(user_id)
        .bind(channel)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to retarget notifications", e)
        })?;

        Ok(result.rows_affected())
    }
}
