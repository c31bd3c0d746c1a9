//! PostgreSQL connection pool management.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use accounthub_core::config::DatabaseConfig;
use accounthub_core::error::{AppError, ErrorKind};

use crate::repositories::{
    ApiTokenRepository, NotificationTargetRepository, PasswordResetRepository, UserRepository,
};

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

/// One repository per account-store concern, all sharing a pool.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Users.
    pub users: UserRepository,
    /// API tokens.
    pub api_tokens: ApiTokenRepository,
    /// Password reset requests.
    pub password_resets: PasswordResetRepository,
    /// Notification targets.
    pub notification_targets: NotificationTargetRepository,
}

impl DatabasePool {
    /// Create a new database pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %redact_credentials(&config.url),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to connect to database", e)
            })?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        crate::migration::run_migrations(&self.pool).await
    }

    /// Build every repository over this pool.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: UserRepository::new(self.pool.clone()),
            api_tokens: ApiTokenRepository::new(self.pool.clone()),
            password_resets: PasswordResetRepository::new(self.pool.clone()),
            notification_targets: NotificationTargetRepository::new(self.pool.clone()),
        }
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Replace the password in a connection URL so it can be logged.
fn redact_credentials(url: &str) -> String {
    let Some(at_pos) = url.find('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    match url[..at_pos].rfind(':') {
        Some(colon_pos) if colon_pos > scheme_end => {
            format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
