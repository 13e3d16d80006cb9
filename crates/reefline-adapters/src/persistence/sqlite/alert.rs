use async_trait::async_trait;

use reefline_core::alert::ParameterAlert;
use reefline_ports::error::PortError;
use reefline_ports::outbound::ParameterAlertRepository;
use reefline_ports::types::AlertFilter;

use super::SqliteDb;

fn decode(data: &str) -> Result<ParameterAlert, PortError> {
    serde_json::from_str(data).map_err(|e| PortError::Persistence(e.to_string()))
}

#[async_trait]
impl ParameterAlertRepository for SqliteDb {
    async fn save(&self, alert: &ParameterAlert) -> Result<(), PortError> {
        let id = alert.id().to_string();
        let aquarium_id = alert.aquarium_id().to_string();
        let test_id = alert.test_id().to_string();
        let data =
            serde_json::to_string(alert).map_err(|e| PortError::Persistence(e.to_string()))?;
        let triggered_at = alert.triggered_at().to_rfc3339();

        sqlx::query(
            "INSERT INTO parameter_alerts (id, aquarium_id, test_id, severity, status, data, triggered_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                severity = excluded.severity,
                status = excluded.status,
                data = excluded.data",
        )
        .bind(&id)
        .bind(&aquarium_id)
        .bind(&test_id)
        .bind(alert.severity().as_str())
        .bind(alert.status().as_str())
        .bind(&data)
        .bind(&triggered_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }

    async fn find_by_filter(&self, filter: &AlertFilter) -> Result<Vec<ParameterAlert>, PortError> {
        let mut sql = String::from("SELECT data FROM parameter_alerts WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(aquarium_id) = &filter.aquarium_id {
            sql.push_str(" AND aquarium_id = ?");
            binds.push(aquarium_id.to_string());
        }
        if let Some(severity) = &filter.severity {
            sql.push_str(" AND severity = ?");
            binds.push(severity.as_str().to_string());
        }
        if let Some(status) = &filter.status {
            sql.push_str(" AND status = ?");
            binds.push(status.as_str().to_string());
        }

        sql.push_str(" ORDER BY triggered_at DESC, rowid ASC");

        let per_page = if filter.per_page == 0 {
            50
        } else {
            filter.per_page
        };
        let offset = filter.page.saturating_sub(1).saturating_mul(per_page);
        sql.push_str(&format!(" LIMIT {per_page} OFFSET {offset}"));

        let mut query = sqlx::query_as::<_, (String,)>(&sql);
        for b in &binds {
            query = query.bind(b);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        rows.iter().map(|(data,)| decode(data)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reefline_core::alert::{AlertDraft, AlertStatus, Direction, Severity};
    use reefline_core::ids::{AquariumId, TestId, ThresholdId, UserId};
    use reefline_core::notification::NotificationMethod;

    fn ts(s: &str) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&chrono::Utc)
    }

    async fn db() -> SqliteDb {
        SqliteDb::new("sqlite::memory:").await.unwrap()
    }

    fn make_alert(aquarium: &AquariumId, severity: Severity, at: &str) -> ParameterAlert {
        ParameterAlert::new(
            AlertDraft {
                aquarium_id: aquarium.clone(),
                user_id: UserId::new(),
                threshold_id: ThresholdId::new(),
                test_id: TestId::new(),
                parameter_name: "Ammonia".into(),
                parameter_value: 0.6,
                unit: "ppm".into(),
                severity,
                direction: Direction::High,
                title: "Critical Ammonia Level - High".into(),
                message: "Ammonia level is high (critical).".into(),
            },
            ts(at),
        )
    }

    async fn only_alert(db: &SqliteDb, aquarium: &AquariumId) -> ParameterAlert {
        let filter = AlertFilter {
            aquarium_id: Some(aquarium.clone()),
            ..Default::default()
        };
        let mut found = db.find_by_filter(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        found.remove(0)
    }

    #[tokio::test]
    async fn save_and_read_back() {
        let db = db().await;
        let aquarium = AquariumId::new();
        let alert = make_alert(&aquarium, Severity::Critical, "2025-01-15T10:00:00Z");

        db.save(&alert).await.unwrap();

        let found = only_alert(&db, &aquarium).await;
        assert_eq!(found, alert);
        assert_eq!(found.status(), AlertStatus::Active);
    }

    #[tokio::test]
    async fn save_updates_notifications_sent() {
        let db = db().await;
        let aquarium = AquariumId::new();
        let mut alert = make_alert(&aquarium, Severity::High, "2025-01-15T10:00:00Z");
        db.save(&alert).await.unwrap();

        alert.record_notification(NotificationMethod::Email, ts("2025-01-15T10:00:01Z"));
        db.save(&alert).await.unwrap();

        let found = only_alert(&db, &aquarium).await;
        assert!(found.was_notified_via(NotificationMethod::Email));
    }

    #[tokio::test]
    async fn find_by_filter_scopes_to_aquarium_and_severity() {
        let db = db().await;
        let tank = AquariumId::new();
        db.save(&make_alert(&tank, Severity::Critical, "2025-01-15T10:00:00Z"))
            .await
            .unwrap();
        db.save(&make_alert(&tank, Severity::Medium, "2025-01-15T11:00:00Z"))
            .await
            .unwrap();
        db.save(&make_alert(&AquariumId::new(), Severity::Critical, "2025-01-15T12:00:00Z"))
            .await
            .unwrap();

        let filter = AlertFilter {
            aquarium_id: Some(tank.clone()),
            ..Default::default()
        };
        let all = db.find_by_filter(&filter).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].severity(), Severity::Medium); // newest first

        let filter = AlertFilter {
            aquarium_id: Some(tank),
            severity: Some(Severity::Critical),
            ..Default::default()
        };
        let critical = db.find_by_filter(&filter).await.unwrap();
        assert_eq!(critical.len(), 1);
    }

    #[tokio::test]
    async fn find_by_filter_paginates() {
        let db = db().await;
        let tank = AquariumId::new();
        for hour in 10..15 {
            let at = format!("2025-01-15T{hour}:00:00Z");
            db.save(&make_alert(&tank, Severity::High, &at)).await.unwrap();
        }

        let filter = AlertFilter {
            page: 2,
            per_page: 2,
            ..Default::default()
        };
        let page = db.find_by_filter(&filter).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].triggered_at(), ts("2025-01-15T12:00:00Z"));
    }

    #[tokio::test]
    async fn huge_page_number_returns_empty_page() {
        let db = db().await;
        db.save(&make_alert(&AquariumId::new(), Severity::High, "2025-01-15T10:00:00Z"))
            .await
            .unwrap();

        let filter = AlertFilter {
            page: u32::MAX,
            per_page: 50,
            ..Default::default()
        };
        assert!(db.find_by_filter(&filter).await.unwrap().is_empty());
    }
}
