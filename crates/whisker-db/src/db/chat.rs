use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};
use whisker_core::{
    models::{ChatRecord, NewChat},
    AppError,
};

/// Registry operations the pipeline depends on.
///
/// Rows are append-only: nothing in the pipeline updates or deletes them.
#[async_trait]
pub trait ChatRegistry: Send + Sync {
    /// Insert a row and return it with its store-assigned id.
    async fn insert(&self, chat: NewChat) -> Result<ChatRecord, AppError>;

    /// All rows, most recently created first.
    async fn list_ordered(&self) -> Result<Vec<ChatRecord>, AppError>;
}

/// Repository for the `chats` registry table
#[derive(Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
}

impl ChatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count registered cats
    #[tracing::instrument(skip(self), fields(db.table = "chats", db.operation = "select"))]
    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<Sqlite, i64>("SELECT COUNT(*) FROM chats")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ChatRegistry for ChatRepository {
    #[tracing::instrument(skip(self, chat), fields(db.table = "chats", db.operation = "insert", chat.name = %chat.name))]
    async fn insert(&self, chat: NewChat) -> Result<ChatRecord, AppError> {
        let record = sqlx::query_as::<Sqlite, ChatRecord>(
            r#"
            INSERT INTO chats (name, email, image_path, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, email, image_path, created_at
            "#,
        )
        .bind(&chat.name)
        .bind(&chat.email)
        .bind(&chat.image_path)
        .bind(chat.created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = record.id, "Chat registered");

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "chats", db.operation = "select"))]
    async fn list_ordered(&self) -> Result<Vec<ChatRecord>, AppError> {
        let records = sqlx::query_as::<Sqlite, ChatRecord>(
            "SELECT id, name, email, image_path, created_at FROM chats ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
