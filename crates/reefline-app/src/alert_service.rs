use chrono::{DateTime, Utc};
use serde::Serialize;

use reefline_core::alert::ParameterAlert;
use reefline_core::context::RequestContext;
use reefline_core::evaluator::{detect_parameter_alerts, AlertSummary};
use reefline_core::events::{
    DomainEvent, NotificationFailed, NotificationSent, ParameterAlertRaised,
};
use reefline_core::notification::{
    format_alert_notification, should_send_notification, NotificationMethod,
};
use reefline_core::threshold::ParameterThreshold;
use reefline_core::water_test::WaterTest;
use reefline_ports::outbound::{
    EventPublisher, Notifier, ParameterAlertRepository, ThresholdRepository,
};
use reefline_ports::types::{AlertFilter, Notification};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub alerts: Vec<ParameterAlert>,
    pub summary: AlertSummary,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

pub struct AlertService<T, A, EP>
where
    T: ThresholdRepository,
    A: ParameterAlertRepository,
    EP: EventPublisher,
{
    thresholds: T,
    alerts: A,
    events: EP,
    notifiers: Vec<Box<dyn Notifier>>,
}

impl<T, A, EP> AlertService<T, A, EP>
where
    T: ThresholdRepository,
    A: ParameterAlertRepository,
    EP: EventPublisher,
{
    pub fn new(thresholds: T, alerts: A, events: EP, notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self {
            thresholds,
            alerts,
            events,
            notifiers,
        }
    }

    /// Evaluate a recorded water test, persist the resulting alerts and
    /// dispatch whatever notifications the thresholds allow.
    ///
    /// A failed delivery is recorded as an event and never fails the call.
    /// A failed save does, and nothing is sent after it.
    pub async fn evaluate(
        &self,
        ctx: &RequestContext,
        test: &WaterTest,
        aquarium_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<EvaluationReport, AppError> {
        let thresholds = self
            .thresholds
            .list_for_aquarium(test.aquarium_id())
            .await?;
        let detection = detect_parameter_alerts(
            test,
            &thresholds,
            test.aquarium_id(),
            ctx.user_id(),
            now,
        );
        tracing::info!(
            test_id = %test.id(),
            aquarium_id = %test.aquarium_id(),
            readings = test.parameters().len(),
            alerts = detection.summary.total,
            critical = detection.summary.critical,
            "water test evaluated"
        );

        let mut alerts = detection.alerts;
        let mut events = Vec::new();
        let mut sent = 0;
        let mut failed = 0;

        for alert in &alerts {
            if let Err(e) = self.alerts.save(alert).await {
                self.publish_partial(events).await;
                return Err(e.into());
            }
            events.push(DomainEvent::ParameterAlertRaised(ParameterAlertRaised {
                alert_id: alert.id().clone(),
                aquarium_id: alert.aquarium_id().clone(),
                test_id: alert.test_id().clone(),
                parameter_name: alert.parameter_name().to_string(),
                severity: alert.severity(),
                occurred_at: now,
            }));
        }

        for alert in &mut alerts {
            let Some(threshold) = thresholds.iter().find(|t| t.id() == alert.threshold_id())
            else {
                continue;
            };
            let dispatched = self.dispatch(alert, threshold, aquarium_name, now).await;
            let mut delivered = false;
            for event in &dispatched {
                match event {
                    DomainEvent::NotificationSent(_) => {
                        sent += 1;
                        delivered = true;
                    }
                    DomainEvent::NotificationFailed(_) => failed += 1,
                    _ => {}
                }
            }
            events.extend(dispatched);

            if delivered {
                if let Err(e) = self.alerts.save(alert).await {
                    self.publish_partial(events).await;
                    return Err(e.into());
                }
            }
        }

        self.events.publish(events).await?;

        Ok(EvaluationReport {
            alerts,
            summary: detection.summary,
            notifications_sent: sent,
            notifications_failed: failed,
        })
    }

    pub async fn list_alerts(&self, filter: &AlertFilter) -> Result<Vec<ParameterAlert>, AppError> {
        Ok(self.alerts.find_by_filter(filter).await?)
    }

    async fn dispatch(
        &self,
        alert: &mut ParameterAlert,
        threshold: &ParameterThreshold,
        aquarium_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<DomainEvent> {
        let mut events = Vec::new();

        for &method in threshold.notification_methods() {
            if !should_send_notification(alert, threshold, method, now) {
                tracing::debug!(
                    alert_id = %alert.id(),
                    method = %method,
                    severity = alert.severity().as_str(),
                    snoozed = threshold.is_snoozed(now),
                    "notification suppressed"
                );
                continue;
            }
            let Some(notifier) = self.notifier_for(method) else {
                tracing::warn!(method = %method, "no notifier registered for method");
                continue;
            };

            let formatted = format_alert_notification(alert, method, aquarium_name);
            let notification = Notification {
                alert_id: alert.id().clone(),
                user_id: alert.user_id().clone(),
                method,
                severity: alert.severity(),
                subject: formatted.subject,
                body: formatted.body,
            };

            match notifier.notify(&notification).await {
                Ok(result) => {
                    alert.record_notification(method, now);
                    events.push(DomainEvent::NotificationSent(NotificationSent {
                        alert_id: alert.id().clone(),
                        method,
                        external_id: result.external_id,
                        occurred_at: now,
                    }));
                }
                Err(e) => {
                    tracing::warn!(
                        alert_id = %alert.id(),
                        method = %method,
                        error = %e,
                        "notification failed"
                    );
                    events.push(DomainEvent::NotificationFailed(NotificationFailed {
                        alert_id: alert.id().clone(),
                        method,
                        error: e.to_string(),
                        occurred_at: now,
                    }));
                }
            }
        }

        events
    }

    /// Best-effort publish of what already happened before a storage error
    /// aborts the evaluation.
    async fn publish_partial(&self, events: Vec<DomainEvent>) {
        if events.is_empty() {
            return;
        }
        if let Err(e) = self.events.publish(events).await {
            tracing::error!(error = %e, "failed to publish events after storage error");
        }
    }

    fn notifier_for(&self, method: NotificationMethod) -> Option<&dyn Notifier> {
        self.notifiers
            .iter()
            .find(|n| n.method() == method)
            .map(|n| &**n)
    }
}
