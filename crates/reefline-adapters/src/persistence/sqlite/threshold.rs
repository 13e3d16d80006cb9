use async_trait::async_trait;

use reefline_core::ids::AquariumId;
use reefline_core::threshold::ParameterThreshold;
use reefline_ports::error::PortError;
use reefline_ports::outbound::ThresholdRepository;

use super::SqliteDb;

fn decode(data: &str) -> Result<ParameterThreshold, PortError> {
    serde_json::from_str(data).map_err(|e| PortError::Persistence(e.to_string()))
}

#[async_trait]
impl ThresholdRepository for SqliteDb {
    async fn save(&self, threshold: &ParameterThreshold) -> Result<(), PortError> {
        let id = threshold.id().to_string();
        let aquarium_id = threshold.aquarium_id().to_string();
        let data =
            serde_json::to_string(threshold).map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "INSERT INTO parameter_thresholds (id, aquarium_id, parameter_name, data)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                aquarium_id = excluded.aquarium_id,
                parameter_name = excluded.parameter_name,
                data = excluded.data",
        )
        .bind(&id)
        .bind(&aquarium_id)
        .bind(threshold.parameter_name())
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ParameterThreshold>, PortError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT data FROM parameter_thresholds WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PortError::Persistence(e.to_string()))?;

        row.map(|(data,)| decode(&data)).transpose()
    }

    async fn list_for_aquarium(
        &self,
        aquarium_id: &AquariumId,
    ) -> Result<Vec<ParameterThreshold>, PortError> {
        // Insertion order matters: the evaluator takes the first enabled match.
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT data FROM parameter_thresholds WHERE aquarium_id = ? ORDER BY rowid ASC",
        )
        .bind(aquarium_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        rows.iter().map(|(data,)| decode(data)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reefline_core::notification::NotificationMethod;
    use reefline_core::threshold::Bounds;

    fn ts(s: &str) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&chrono::Utc)
    }

    async fn db() -> SqliteDb {
        SqliteDb::new("sqlite::memory:").await.unwrap()
    }

    fn make_threshold(aquarium: &AquariumId, name: &str) -> ParameterThreshold {
        ParameterThreshold::new(
            aquarium.clone(),
            name,
            vec![NotificationMethod::Email, NotificationMethod::InApp],
        )
        .with_ideal(Bounds::between(6.5, 7.5))
        .with_warning(Bounds::between(6.0, 8.0))
    }

    #[tokio::test]
    async fn save_and_find_by_id() {
        let db = db().await;
        let threshold = make_threshold(&AquariumId::new(), "pH");

        db.save(&threshold).await.unwrap();

        let found = db
            .find_by_id(&threshold.id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, threshold);
    }

    #[tokio::test]
    async fn find_by_id_returns_none() {
        let db = db().await;
        let found = db
            .find_by_id("00000000-0000-0000-0000-000000000000")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn save_updates_existing() {
        let db = db().await;
        let mut threshold = make_threshold(&AquariumId::new(), "pH");
        db.save(&threshold).await.unwrap();

        threshold.snooze(ts("2025-01-15T18:00:00Z"));
        db.save(&threshold).await.unwrap();

        let found = db
            .find_by_id(&threshold.id().to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.snooze_until(), Some(ts("2025-01-15T18:00:00Z")));
    }

    #[tokio::test]
    async fn list_for_aquarium_keeps_insertion_order() {
        let db = db().await;
        let aquarium = AquariumId::new();
        for name in ["pH", "Ammonia", "Nitrate"] {
            db.save(&make_threshold(&aquarium, name)).await.unwrap();
        }
        db.save(&make_threshold(&AquariumId::new(), "pH"))
            .await
            .unwrap();

        let listed = db.list_for_aquarium(&aquarium).await.unwrap();
        let names: Vec<_> = listed.iter().map(|t| t.parameter_name()).collect();
        assert_eq!(names, ["pH", "Ammonia", "Nitrate"]);
    }
}
