//! SQLite connection pool and schema.

use std::path::Path;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::Result;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS solicitations (
        id TEXT PRIMARY KEY,
        filename TEXT NOT NULL,
        file_path TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'uploaded',
        raw_text TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS extracted_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        solicitation_id TEXT NOT NULL UNIQUE REFERENCES solicitations(id),
        nsn TEXT,
        quantity INTEGER,
        delivery_days INTEGER,
        description TEXT,
        confidence_score REAL NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS price_suggestions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        solicitation_id TEXT NOT NULL REFERENCES solicitations(id),
        price_low INTEGER NOT NULL,
        price_high INTEGER NOT NULL,
        confidence_percent INTEGER NOT NULL,
        rationale_json TEXT NOT NULL,
        base_cost INTEGER NOT NULL,
        margin_factor REAL NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS audit_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        solicitation_id TEXT NOT NULL REFERENCES solicitations(id),
        action TEXT NOT NULL,
        details TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_suggestions_solicitation
        ON price_suggestions(solicitation_id, created_at)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_audit_solicitation
        ON audit_logs(solicitation_id, created_at)
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS audit_logs_no_update
    BEFORE UPDATE ON audit_logs
    BEGIN
        SELECT RAISE(ABORT, 'audit log is append-only');
    END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS audit_logs_no_delete
    BEFORE DELETE ON audit_logs
    BEGIN
        SELECT RAISE(ABORT, 'audit log is append-only');
    END
    "#,
];

/// Handle to the RFQ database.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `url` and run migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        info!("Connecting to database: {}", url);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Open (creating if needed) `rfq.db` inside `dir`.
    pub async fn open_in(dir: &Path, max_connections: u32) -> Result<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let url = format!("sqlite:{}?mode=rwc", dir.join("rfq.db").display());
        Self::connect(&url, max_connections).await
    }

    /// Private in-memory database. A single connection keeps it alive.
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations...");
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Migrations complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(
            names,
            ["audit_logs", "extracted_data", "price_suggestions", "solicitations"]
        );
    }

    #[tokio::test]
    async fn test_open_in_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");
        let db = Database::open_in(&nested, 2).await.unwrap();
        assert!(nested.join("rfq.db").exists());
        drop(db);
    }
}
