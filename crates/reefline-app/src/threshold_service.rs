use chrono::{DateTime, Utc};

use reefline_core::events::{DomainEvent, ThresholdSnoozed};
use reefline_core::ids::AquariumId;
use reefline_core::notification::NotificationMethod;
use reefline_core::threshold::{defaults, ParameterThreshold};
use reefline_ports::error::PortError;
use reefline_ports::outbound::{EventPublisher, ThresholdRepository};

use crate::error::AppError;

pub struct ThresholdService<T, EP>
where
    T: ThresholdRepository,
    EP: EventPublisher,
{
    thresholds: T,
    events: EP,
}

impl<T, EP> ThresholdService<T, EP>
where
    T: ThresholdRepository,
    EP: EventPublisher,
{
    pub fn new(thresholds: T, events: EP) -> Self {
        Self { thresholds, events }
    }

    /// Persist a threshold after checking that its bands nest.
    pub async fn save(&self, threshold: &ParameterThreshold) -> Result<(), AppError> {
        threshold.validate()?;
        self.thresholds.save(threshold).await?;
        Ok(())
    }

    pub async fn list(&self, aquarium_id: &AquariumId) -> Result<Vec<ParameterThreshold>, AppError> {
        Ok(self.thresholds.list_for_aquarium(aquarium_id).await?)
    }

    pub async fn snooze(
        &self,
        threshold_id: &str,
        until: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<ParameterThreshold, AppError> {
        self.update_snooze(threshold_id, Some(until), now).await
    }

    pub async fn unsnooze(
        &self,
        threshold_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ParameterThreshold, AppError> {
        self.update_snooze(threshold_id, None, now).await
    }

    /// Create the freshwater defaults for any core parameter the aquarium
    /// does not configure yet. Returns only the thresholds created.
    pub async fn seed_defaults(
        &self,
        aquarium_id: &AquariumId,
        methods: &[NotificationMethod],
    ) -> Result<Vec<ParameterThreshold>, AppError> {
        let existing = self.thresholds.list_for_aquarium(aquarium_id).await?;
        let mut created = Vec::new();

        for threshold in defaults::freshwater(aquarium_id, methods) {
            if existing
                .iter()
                .any(|t| t.parameter_name() == threshold.parameter_name())
            {
                continue;
            }
            self.thresholds.save(&threshold).await?;
            created.push(threshold);
        }

        tracing::info!(
            aquarium_id = %aquarium_id,
            created = created.len(),
            "default thresholds seeded"
        );
        Ok(created)
    }

    async fn update_snooze(
        &self,
        threshold_id: &str,
        until: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<ParameterThreshold, AppError> {
        let mut threshold = self
            .thresholds
            .find_by_id(threshold_id)
            .await?
            .ok_or(PortError::NotFound)?;

        match until {
            Some(until) => threshold.snooze(until),
            None => threshold.unsnooze(),
        }
        self.thresholds.save(&threshold).await?;

        self.events
            .publish(vec![DomainEvent::ThresholdSnoozed(ThresholdSnoozed {
                threshold_id: threshold.id().clone(),
                until,
                occurred_at: now,
            })])
            .await?;
        Ok(threshold)
    }
}
