//! Database repositories for data access layer

pub mod chat;

pub use chat::{ChatRegistry, ChatRepository};
