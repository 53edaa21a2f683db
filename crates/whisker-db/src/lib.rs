//! Whisker database layer
//!
//! The cat registry lives in a single SQLite table (`chats`). Schema changes are
//! applied from the workspace `migrations/` directory, embedded at compile time.

pub mod db;

pub use db::{ChatRegistry, ChatRepository};

/// Embedded schema migrations for the registry database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
