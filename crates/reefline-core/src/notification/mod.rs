pub mod method;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::{ParameterAlert, Severity};
use crate::evaluator::with_unit;
use crate::threshold::ParameterThreshold;

pub use method::NotificationMethod;

const DEFAULT_AQUARIUM_NAME: &str = "your aquarium";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedNotification {
    pub subject: String,
    pub body: String,
}

/// Alerts partitioned by severity, each bucket in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertBatches {
    pub critical: Vec<ParameterAlert>,
    pub high: Vec<ParameterAlert>,
    pub medium: Vec<ParameterAlert>,
    pub low: Vec<ParameterAlert>,
}

impl AlertBatches {
    pub fn bucket(&self, severity: Severity) -> &[ParameterAlert] {
        match severity {
            Severity::Critical => &self.critical,
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
        }
    }
}

pub fn format_alert_notification(
    alert: &ParameterAlert,
    method: NotificationMethod,
    aquarium_name: Option<&str>,
) -> FormattedNotification {
    let aquarium = aquarium_name.unwrap_or(DEFAULT_AQUARIUM_NAME);
    match method {
        NotificationMethod::Email => FormattedNotification {
            subject: format!("Reefline Alert: {}", alert.title()),
            body: email_body(alert, aquarium),
        },
        NotificationMethod::Sms => FormattedNotification {
            subject: alert.title().to_string(),
            body: format!("Reefline [{aquarium}]: {}", first_sentence(alert.message())),
        },
        NotificationMethod::Push => FormattedNotification {
            subject: alert.title().to_string(),
            body: first_sentence(alert.message()).to_string(),
        },
        NotificationMethod::InApp => FormattedNotification {
            subject: alert.title().to_string(),
            body: alert.message().to_string(),
        },
    }
}

fn email_body(alert: &ParameterAlert, aquarium: &str) -> String {
    [
        "Hello,".to_string(),
        String::new(),
        format!("A water parameter alert was raised for {aquarium}."),
        String::new(),
        format!("Parameter: {}", alert.parameter_name()),
        format!(
            "Reading: {}",
            with_unit(alert.parameter_value(), alert.unit())
        ),
        format!("Severity: {}", alert.severity().label()),
        format!(
            "Detected: {}",
            alert.triggered_at().format("%Y-%m-%d %H:%M UTC")
        ),
        String::new(),
        alert.message().to_string(),
        String::new(),
        "-- ".to_string(),
        "Reefline Water Monitoring".to_string(),
        format!(
            "You are receiving this because email alerts are enabled for {}.",
            alert.parameter_name()
        ),
    ]
    .join("\n")
}

/// Text before the first '.', or the whole message if it has none.
fn first_sentence(message: &str) -> &str {
    message.split('.').next().unwrap_or(message)
}

/// Dispatch policy for one alert on one channel. Snooze beats severity, and
/// only in-app delivers medium and low alerts.
pub fn should_send_notification(
    alert: &ParameterAlert,
    threshold: &ParameterThreshold,
    method: NotificationMethod,
    now: DateTime<Utc>,
) -> bool {
    if !threshold.notification_methods().contains(&method) {
        return false;
    }
    if threshold.is_snoozed(now) {
        return false;
    }
    alert.severity().is_urgent() || method == NotificationMethod::InApp
}

pub fn batch_alerts(alerts: &[ParameterAlert]) -> AlertBatches {
    let mut batches = AlertBatches::default();
    for alert in alerts {
        let bucket = match alert.severity() {
            Severity::Critical => &mut batches.critical,
            Severity::High => &mut batches.high,
            Severity::Medium => &mut batches.medium,
            Severity::Low => &mut batches.low,
        };
        bucket.push(alert.clone());
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::{AlertDraft, Direction};
    use crate::ids::{AquariumId, TestId, ThresholdId, UserId};
    use crate::threshold::Bounds;

    fn ts(s: &str) -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn now() -> DateTime<Utc> {
        ts("2025-01-15T10:00:00Z")
    }

    fn make_alert(severity: Severity, name: &str) -> ParameterAlert {
        ParameterAlert::new(
            AlertDraft {
                aquarium_id: AquariumId::new(),
                user_id: UserId::new(),
                threshold_id: ThresholdId::new(),
                test_id: TestId::new(),
                parameter_name: name.into(),
                parameter_value: 0.6,
                unit: "ppm".into(),
                severity,
                direction: Direction::High,
                title: format!("{} {name} Level - High", severity.label()),
                message: format!(
                    "{name} level is high ({}). Current reading is 0.6 ppm, above the critical limit of 0.5 ppm. Act now.",
                    severity.as_str()
                ),
            },
            now(),
        )
    }

    fn threshold(methods: Vec<NotificationMethod>) -> ParameterThreshold {
        ParameterThreshold::new(AquariumId::new(), "Ammonia", methods)
            .with_critical(Bounds::max_only(0.5))
    }

    #[test]
    fn sms_body_stops_at_first_period() {
        let alert = make_alert(Severity::Critical, "Ammonia");
        let formatted =
            format_alert_notification(&alert, NotificationMethod::Sms, Some("Reef 90"));
        assert_eq!(
            formatted.body,
            "Reefline [Reef 90]: Ammonia level is high (critical)"
        );
        assert!(!formatted.body.contains('.'));
    }

    #[test]
    fn push_body_is_first_sentence_only() {
        let alert = make_alert(Severity::High, "Nitrite");
        let formatted = format_alert_notification(&alert, NotificationMethod::Push, None);
        assert_eq!(formatted.subject, "High Nitrite Level - High");
        assert_eq!(formatted.body, "Nitrite level is high (high)");
    }

    #[test]
    fn in_app_passes_title_and_message_through() {
        let alert = make_alert(Severity::Medium, "pH");
        let formatted = format_alert_notification(&alert, NotificationMethod::InApp, None);
        assert_eq!(formatted.subject, alert.title());
        assert_eq!(formatted.body, alert.message());
    }

    #[test]
    fn email_has_subject_details_and_signature() {
        let alert = make_alert(Severity::Critical, "Ammonia");
        let formatted =
            format_alert_notification(&alert, NotificationMethod::Email, Some("Reef 90"));
        assert_eq!(formatted.subject, "Reefline Alert: Critical Ammonia Level - High");
        assert!(formatted.body.contains("raised for Reef 90."));
        assert!(formatted.body.contains("Reading: 0.6 ppm"));
        assert!(formatted.body.contains("Severity: Critical"));
        assert!(formatted.body.contains("Detected: 2025-01-15 10:00 UTC"));
        assert!(formatted.body.contains(alert.message()));
        assert!(formatted.body.contains("\n-- \nReefline Water Monitoring"));
    }

    #[test]
    fn missing_aquarium_name_uses_default() {
        let alert = make_alert(Severity::Critical, "Ammonia");
        let formatted = format_alert_notification(&alert, NotificationMethod::Sms, None);
        assert!(formatted.body.starts_with("Reefline [your aquarium]: "));
    }

    #[test]
    fn first_sentence_without_period_is_whole_message() {
        assert_eq!(first_sentence("no period here"), "no period here");
        assert_eq!(first_sentence(""), "");
    }

    #[test]
    fn unconfigured_method_never_sends() {
        let alert = make_alert(Severity::Critical, "Ammonia");
        let t = threshold(vec![NotificationMethod::Email]);
        assert!(!should_send_notification(&alert, &t, NotificationMethod::Push, now()));
    }

    #[test]
    fn snooze_suppresses_even_critical() {
        let alert = make_alert(Severity::Critical, "Ammonia");
        let mut t = threshold(NotificationMethod::ALL.to_vec());
        t.snooze(ts("2025-01-15T12:00:00Z"));
        for method in NotificationMethod::ALL {
            assert!(!should_send_notification(&alert, &t, method, now()));
        }
    }

    #[test]
    fn expired_snooze_is_ignored() {
        let alert = make_alert(Severity::Critical, "Ammonia");
        let mut t = threshold(vec![NotificationMethod::Sms]);
        t.snooze(ts("2025-01-15T09:00:00Z"));
        assert!(should_send_notification(&alert, &t, NotificationMethod::Sms, now()));
    }

    #[test]
    fn urgent_alerts_send_on_every_configured_channel() {
        let t = threshold(NotificationMethod::ALL.to_vec());
        for severity in [Severity::Critical, Severity::High] {
            let alert = make_alert(severity, "Ammonia");
            for method in NotificationMethod::ALL {
                assert!(should_send_notification(&alert, &t, method, now()));
            }
        }
    }

    #[test]
    fn minor_alerts_only_send_in_app() {
        let t = threshold(NotificationMethod::ALL.to_vec());
        for severity in [Severity::Medium, Severity::Low] {
            let alert = make_alert(severity, "pH");
            assert!(!should_send_notification(&alert, &t, NotificationMethod::Sms, now()));
            assert!(!should_send_notification(&alert, &t, NotificationMethod::Email, now()));
            assert!(!should_send_notification(&alert, &t, NotificationMethod::Push, now()));
            assert!(should_send_notification(&alert, &t, NotificationMethod::InApp, now()));
        }
    }

    #[test]
    fn batch_keeps_relative_order_per_bucket() {
        let alerts = vec![
            make_alert(Severity::Critical, "Ammonia"),
            make_alert(Severity::Medium, "pH"),
            make_alert(Severity::High, "Nitrite"),
            make_alert(Severity::Critical, "Nitrate"),
            make_alert(Severity::Low, "KH"),
        ];

        let batches = batch_alerts(&alerts);
        assert_eq!(batches.critical.len(), 2);
        assert_eq!(batches.high.len(), 1);
        assert_eq!(batches.medium.len(), 1);
        assert_eq!(batches.low.len(), 1);
        assert_eq!(batches.critical[0].id(), alerts[0].id());
        assert_eq!(batches.critical[1].id(), alerts[3].id());
        assert_eq!(batches.bucket(Severity::Low)[0].parameter_name(), "KH");
    }

    #[test]
    fn batch_of_nothing_is_empty() {
        assert_eq!(batch_alerts(&[]), AlertBatches::default());
    }
}
