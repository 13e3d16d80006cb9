use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alert::Severity;
use crate::ids::{AlertId, AquariumId, TestId, ThresholdId};
use crate::notification::NotificationMethod;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DomainEvent {
    ParameterAlertRaised(ParameterAlertRaised),
    NotificationSent(NotificationSent),
    NotificationFailed(NotificationFailed),
    ThresholdSnoozed(ThresholdSnoozed),
}

impl DomainEvent {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::ParameterAlertRaised(e) => e.occurred_at,
            Self::NotificationSent(e) => e.occurred_at,
            Self::NotificationFailed(e) => e.occurred_at,
            Self::ThresholdSnoozed(e) => e.occurred_at,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ParameterAlertRaised(_) => "parameter_alert.raised",
            Self::NotificationSent(_) => "notification.sent",
            Self::NotificationFailed(_) => "notification.failed",
            Self::ThresholdSnoozed(_) => "threshold.snoozed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterAlertRaised {
    pub alert_id: AlertId,
    pub aquarium_id: AquariumId,
    pub test_id: TestId,
    pub parameter_name: String,
    pub severity: Severity,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationSent {
    pub alert_id: AlertId,
    pub method: NotificationMethod,
    pub external_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationFailed {
    pub alert_id: AlertId,
    pub method: NotificationMethod,
    pub error: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdSnoozed {
    pub threshold_id: ThresholdId,
    pub until: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339("2025-01-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn event_types_are_unique_strings() {
        let events = [
            DomainEvent::ParameterAlertRaised(ParameterAlertRaised {
                alert_id: AlertId::new(),
                aquarium_id: AquariumId::new(),
                test_id: TestId::new(),
                parameter_name: "pH".into(),
                severity: Severity::Medium,
                occurred_at: now(),
            }),
            DomainEvent::NotificationSent(NotificationSent {
                alert_id: AlertId::new(),
                method: NotificationMethod::Email,
                external_id: None,
                occurred_at: now(),
            }),
            DomainEvent::NotificationFailed(NotificationFailed {
                alert_id: AlertId::new(),
                method: NotificationMethod::Sms,
                error: "rate limited".into(),
                occurred_at: now(),
            }),
            DomainEvent::ThresholdSnoozed(ThresholdSnoozed {
                threshold_id: ThresholdId::new(),
                until: None,
                occurred_at: now(),
            }),
        ];
        let mut unique = std::collections::HashSet::new();
        for event in &events {
            assert!(
                unique.insert(event.event_type()),
                "duplicate event type: {}",
                event.event_type()
            );
            assert_eq!(event.occurred_at(), now());
        }
    }

    #[test]
    fn notification_events_carry_method() {
        let event = DomainEvent::NotificationSent(NotificationSent {
            alert_id: AlertId::new(),
            method: NotificationMethod::Push,
            external_id: Some("msg-1".into()),
            occurred_at: now(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["NotificationSent"]["method"], "push");
    }
}
