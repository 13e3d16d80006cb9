use async_trait::async_trait;

use reefline_core::alert::ParameterAlert;
use reefline_core::events::DomainEvent;
use reefline_core::ids::AquariumId;
use reefline_core::notification::NotificationMethod;
use reefline_core::threshold::ParameterThreshold;

use crate::error::{NotifyError, PortError};
use crate::types::{AlertFilter, Notification, NotifyResult};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<NotifyResult, NotifyError>;
    fn method(&self) -> NotificationMethod;
}

#[async_trait]
pub trait ThresholdRepository: Send + Sync {
    async fn save(&self, threshold: &ParameterThreshold) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ParameterThreshold>, PortError>;
    async fn list_for_aquarium(
        &self,
        aquarium_id: &AquariumId,
    ) -> Result<Vec<ParameterThreshold>, PortError>;
}

#[async_trait]
pub trait ParameterAlertRepository: Send + Sync {
    async fn save(&self, alert: &ParameterAlert) -> Result<(), PortError>;
    async fn find_by_filter(&self, filter: &AlertFilter) -> Result<Vec<ParameterAlert>, PortError>;
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError>;
}
