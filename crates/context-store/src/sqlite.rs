//! SQLite-backed context store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use tracing::info;

use crate::{Context, ContextError, ContextRepository};

/// Context store in a single `contexts` table; creates the database file if missing.
#[derive(Clone)]
pub struct SqliteContextRepository {
    pool: SqlitePool,
}

impl SqliteContextRepository {
    pub async fn new(database_path: &str) -> Result<Self, ContextError> {
        info!("Initializing SQLite context store: {}", database_path);

        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .filename(database_path);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), ContextError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contexts (
                key TEXT PRIMARY KEY,
                character_id INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ContextRepository for SqliteContextRepository {
    async fn get(&self, key: &str) -> Result<Option<Context>, ContextError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT character_id FROM contexts WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(character_id,)| Context::new(character_id)))
    }

    async fn set(&self, key: &str, context: &Context) -> Result<(), ContextError> {
        sqlx::query(
            r#"
            INSERT INTO contexts (key, character_id, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                character_id = excluded.character_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(context.character_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), ContextError> {
        self.pool.close().await;
        info!("SQLite context store closed");
        Ok(())
    }
}
