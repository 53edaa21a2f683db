use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "sqlx")]
use sqlx::FromRow;
use utoipa::ToSchema;

/// A registered cat, one row of the `chats` registry table.
///
/// Rows are only ever inserted; `image_path` is the public URL of the archived
/// copy, never the staged upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ChatRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub image_path: String,
    pub created_at: DateTime<Utc>,
}

/// Values written by a registry insert; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewChat {
    pub name: String,
    pub email: String,
    pub image_path: String,
    pub created_at: DateTime<Utc>,
}

impl NewChat {
    pub fn new(name: impl Into<String>, email: impl Into<String>, image_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            image_path: image_path.into(),
            created_at: Utc::now(),
        }
    }
}
