//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// SMTP settings used to deliver password-reset messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: String,
    /// SMTP password.
    #[serde(default, skip_serializing)]
    pub password: String,
    /// Use STARTTLS instead of implicit TLS.
    #[serde(default = "default_true")]
    pub use_starttls: bool,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Sender address.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Base URL of the page that redeems a reset code; `?c=<code>` is appended.
    #[serde(default = "default_reset_url")]
    pub reset_url: String,
    /// SMTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            use_starttls: true,
            from_name: default_from_name(),
            from_email: default_from_email(),
            reset_url: default_reset_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn default_from_name() -> String {
    "AccountHub".to_string()
}

fn default_from_email() -> String {
    "no-reply@localhost".to_string()
}

fn default_reset_url() -> String {
    "http://localhost:2021/password/reset".to_string()
}

fn default_timeout() -> u64 {
    10
}
