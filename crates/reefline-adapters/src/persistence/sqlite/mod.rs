mod alert;
mod event;
mod threshold;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use reefline_ports::error::PortError;

#[derive(Clone)]
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    pub async fn new(url: &str) -> Result<Self, PortError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| PortError::Connection(e.to_string()))?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), PortError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS parameter_thresholds (
                id TEXT PRIMARY KEY,
                aquarium_id TEXT NOT NULL,
                parameter_name TEXT NOT NULL,
                data TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_thresholds_aquarium
             ON parameter_thresholds(aquarium_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS parameter_alerts (
                id TEXT PRIMARY KEY,
                aquarium_id TEXT NOT NULL,
                test_id TEXT NOT NULL,
                severity TEXT NOT NULL,
                status TEXT NOT NULL,
                data TEXT NOT NULL,
                triggered_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_alerts_aquarium
             ON parameter_alerts(aquarium_id, triggered_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                event_type TEXT NOT NULL,
                data TEXT NOT NULL,
                occurred_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
