mod event;
mod settings;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::debug;

use intake_ports::error::PortError;

#[derive(Clone)]
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    pub async fn new(url: &str) -> Result<Self, PortError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| PortError::Connection(e.to_string()))?;

        let db = Self { pool };
        db.init_schema().await?;
        debug!(url, "calendar store schema ready");
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), PortError> {
        // block_from is the start date widened backwards by whole buffered
        // days; the overlap query filters on it and the resolver applies
        // the exact buffer-hour check.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS calendar_events (
                id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                block_from TEXT NOT NULL,
                end_date TEXT NOT NULL,
                is_recurring INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_calendar_events_span
             ON calendar_events(block_from, end_date)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS admissibility_settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                data TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
