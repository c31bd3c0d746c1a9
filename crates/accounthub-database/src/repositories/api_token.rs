//! API token repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use accounthub_core::error::{AppError, ErrorKind};
use accounthub_core::result::AppResult;
use accounthub_entity::api_token::{ApiToken, CreateApiToken};

use crate::store::ApiTokenStore;

/// Repository for long-lived API tokens.
#[derive(Debug, Clone)]
pub struct ApiTokenRepository {
    pool: PgPool,
}

impl ApiTokenRepository {
    /// Create a new API token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiTokenStore for ApiTokenRepository {
    async fn create(&self, data: &CreateApiToken) -> AppResult<ApiToken> {
        sqlx::query_as::<_, ApiToken>(
            "INSERT INTO api_tokens (user_id, name, token_hash) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.name)
        .bind(&data.token_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("api_tokens_name_key") =>
            {
                AppError::name_conflict(format!("Token name '{}' is already in use", data.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to store API token", e),
        })
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<ApiToken>> {
        sqlx::query_as::<_, ApiToken>(
            "SELECT * FROM api_tokens WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list API tokens", e))
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<ApiToken>> {
        sqlx::query_as::<_, ApiToken>("SELECT * FROM api_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find API token", e))
    }

    async fn delete(&self, user_id: i64, token_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM api_tokens WHERE id = $1 AND user_id = $2")
            .bind(token_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete API token", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
