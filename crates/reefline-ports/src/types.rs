use serde::{Deserialize, Serialize};

use reefline_core::alert::{AlertStatus, Severity};
use reefline_core::ids::{AlertId, AquariumId, UserId};
use reefline_core::notification::NotificationMethod;

/// A formatted alert ready to hand to a channel adapter.
#[derive(Debug, Clone)]
pub struct Notification {
    pub alert_id: AlertId,
    pub user_id: UserId,
    pub method: NotificationMethod,
    pub severity: Severity,
    pub subject: String,
    pub body: String,
}

/// Delivery metadata returned by notifiers.
#[derive(Debug, Clone, Default)]
pub struct NotifyResult {
    pub external_id: Option<String>,
}

/// Filter criteria for querying stored alerts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertFilter {
    pub aquarium_id: Option<AquariumId>,
    pub severity: Option<Severity>,
    pub status: Option<AlertStatus>,
    pub page: u32,
    pub per_page: u32,
}
