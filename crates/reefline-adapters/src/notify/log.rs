use async_trait::async_trait;

use reefline_core::notification::NotificationMethod;
use reefline_ports::error::NotifyError;
use reefline_ports::outbound::Notifier;
use reefline_ports::types::{Notification, NotifyResult};

/// Writes notifications to the tracing log instead of a delivery provider.
/// Stands in for email, SMS and push gateways, and is the in-app sink.
pub struct LogNotifier {
    method: NotificationMethod,
}

impl LogNotifier {
    pub fn new(method: NotificationMethod) -> Self {
        Self { method }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<NotifyResult, NotifyError> {
        if notification.method != self.method {
            return Err(NotifyError::ChannelUnavailable);
        }

        tracing::info!(
            method = %self.method,
            alert_id = %notification.alert_id,
            user_id = %notification.user_id,
            severity = notification.severity.as_str(),
            subject = %notification.subject,
            "{}",
            notification.body
        );

        Ok(NotifyResult {
            external_id: Some(format!("log-{}", notification.alert_id)),
        })
    }

    fn method(&self) -> NotificationMethod {
        self.method
    }
}
