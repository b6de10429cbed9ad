//! Keyed view-context store
//!
//! Each list view persists its filter context (visible panels, page size,
//! sort, active filters) under a section key such as `alert-section`. The
//! context is read once on view activation and rewritten on every filter
//! mutation, so writes must be cheap and idempotent.

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use time::OffsetDateTime;

use crate::error::{Result, StorageError};

#[derive(Clone)]
pub struct ContextStore {
    pool: SqlitePool,
}

impl ContextStore {
    /// Open (or create) the store at `db_path`, defaulting to the platform
    /// data directory.
    pub async fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(path) => path,
            None => Self::default_path()?,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);

        Self::open(options).await
    }

    /// Private in-memory store, used by tests and one-shot CLI runs
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(StorageError::Database)?;
        Self::open(options).await
    }

    async fn open(options: SqliteConnectOptions) -> Result<Self> {
        // A single connection keeps in-memory databases coherent and is
        // plenty for a per-view context store.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS view_context (
                section TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    fn default_path() -> Result<PathBuf> {
        if let Some(dirs) = directories::ProjectDirs::from("com", "triage", "triage") {
            Ok(dirs.data_dir().join("context.db"))
        } else {
            Ok(PathBuf::from(".triage/context.db"))
        }
    }

    pub async fn load(&self, section: &str) -> Result<Option<serde_json::Value>> {
        let row: Option<String> =
            sqlx::query_scalar("SELECT data FROM view_context WHERE section = ?1")
                .bind(section)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, section: &str, data: &serde_json::Value) -> Result<()> {
        sqlx::query(
            "INSERT INTO view_context (section, data, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(section) DO UPDATE SET
                 data = excluded.data,
                 updated_at = excluded.updated_at",
        )
        .bind(section)
        .bind(serde_json::to_string(data)?)
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove(&self, section: &str) -> Result<()> {
        sqlx::query("DELETE FROM view_context WHERE section = ?1")
            .bind(section)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
