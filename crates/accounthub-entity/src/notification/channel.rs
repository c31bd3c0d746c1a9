//! Notification delivery channel enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Channel a user's notifications are delivered through.
///
/// `None` is only ever a request value: it means "remove my target" and is
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    /// No delivery target.
    None = 0,
    /// Telegram bot message.
    Telegram = 1,
    /// Pushover push notification.
    Pushover = 2,
    /// Outgoing webhook.
    Webhook = 3,
}

impl NotificationChannel {
    /// Return the channel as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Telegram => "telegram",
            Self::Pushover => "pushover",
            Self::Webhook => "webhook",
        }
    }

    /// Whether this value means "no target".
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationChannel {
    type Err = accounthub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "telegram" => Ok(Self::Telegram),
            "pushover" => Ok(Self::Pushover),
            "webhook" => Ok(Self::Webhook),
            _ => Err(accounthub_core::AppError::validation(format!(
                "Invalid notification channel: '{s}'. Expected one of: none, telegram, pushover, webhook"
            ))),
        }
    }
}
