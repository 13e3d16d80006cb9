use async_trait::async_trait;

use reefline_core::events::DomainEvent;
use reefline_ports::error::PortError;
use reefline_ports::outbound::EventPublisher;

use super::SqliteDb;

fn persistence(e: impl std::fmt::Display) -> PortError {
    PortError::Persistence(e.to_string())
}

/// Appends a batch atomically: either every event of one evaluation is
/// stored or none is.
#[async_trait]
impl EventPublisher for SqliteDb {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError> {
        if events.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(persistence)?;
        for event in &events {
            let data = serde_json::to_string(event).map_err(persistence)?;
            sqlx::query("INSERT INTO events (event_type, data, occurred_at) VALUES (?, ?, ?)")
                .bind(event.event_type())
                .bind(data)
                .bind(event.occurred_at().to_rfc3339())
                .execute(&mut *tx)
                .await
                .map_err(persistence)?;
        }
        tx.commit().await.map_err(persistence)?;

        tracing::debug!(count = events.len(), "events stored");
        Ok(())
    }
}
