//! # accounthub-database
//!
//! The account store collaborator: trait definitions, PostgreSQL
//! repositories backed by sqlx, and an in-memory implementation for tests
//! and single-node development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryAccountStore;
pub use store::{
    ApiTokenStore, NotificationTargetStore, PasswordResetStore, RedeemOutcome, UserStore,
};
