//! Notification target entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::channel::NotificationChannel;

/// A user's preferred delivery channel. At most one row per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NotificationTarget {
    /// Owning user (primary key).
    pub user_id: i64,
    /// Delivery channel; never [`NotificationChannel::None`].
    pub channel: NotificationChannel,
    /// When the target was first set.
    pub created_at: DateTime<Utc>,
}
