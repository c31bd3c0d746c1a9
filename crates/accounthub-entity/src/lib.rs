//! # accounthub-entity
//!
//! Domain entity models for AccountHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod api_token;
pub mod notification;
pub mod password_reset;
pub mod user;
