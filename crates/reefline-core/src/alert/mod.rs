pub mod direction;
pub mod severity;
pub mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AlertId, AquariumId, TestId, ThresholdId, UserId};
use crate::notification::NotificationMethod;

pub use direction::Direction;
pub use severity::Severity;
pub use status::AlertStatus;

/// Everything needed to raise an alert except the generated id and timestamp.
#[derive(Debug, Clone)]
pub struct AlertDraft {
    pub aquarium_id: AquariumId,
    pub user_id: UserId,
    pub threshold_id: ThresholdId,
    pub test_id: TestId,
    pub parameter_name: String,
    pub parameter_value: f64,
    pub unit: String,
    pub severity: Severity,
    pub direction: Direction,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub method: NotificationMethod,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAlert {
    id: AlertId,
    aquarium_id: AquariumId,
    user_id: UserId,
    threshold_id: ThresholdId,
    test_id: TestId,
    parameter_name: String,
    parameter_value: f64,
    unit: String,
    severity: Severity,
    direction: Direction,
    status: AlertStatus,
    title: String,
    message: String,
    triggered_at: DateTime<Utc>,
    notifications_sent: Vec<NotificationRecord>,
}

impl ParameterAlert {
    pub fn new(draft: AlertDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: AlertId::new(),
            aquarium_id: draft.aquarium_id,
            user_id: draft.user_id,
            threshold_id: draft.threshold_id,
            test_id: draft.test_id,
            parameter_name: draft.parameter_name,
            parameter_value: draft.parameter_value,
            unit: draft.unit,
            severity: draft.severity,
            direction: draft.direction,
            status: AlertStatus::Active,
            title: draft.title,
            message: draft.message,
            triggered_at: now,
            notifications_sent: Vec::new(),
        }
    }

    pub fn record_notification(&mut self, method: NotificationMethod, now: DateTime<Utc>) {
        self.notifications_sent.push(NotificationRecord {
            method,
            sent_at: now,
        });
    }

    pub fn was_notified_via(&self, method: NotificationMethod) -> bool {
        self.notifications_sent.iter().any(|n| n.method == method)
    }

    pub fn id(&self) -> &AlertId {
        &self.id
    }

    pub fn aquarium_id(&self) -> &AquariumId {
        &self.aquarium_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn threshold_id(&self) -> &ThresholdId {
        &self.threshold_id
    }

    pub fn test_id(&self) -> &TestId {
        &self.test_id
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn parameter_value(&self) -> f64 {
        self.parameter_value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> AlertStatus {
        self.status
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn triggered_at(&self) -> DateTime<Utc> {
        self.triggered_at
    }

    pub fn notifications_sent(&self) -> &[NotificationRecord] {
        &self.notifications_sent
    }
}
