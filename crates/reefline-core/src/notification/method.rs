use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationMethod {
    Email,
    Sms,
    Push,
    InApp,
}

impl NotificationMethod {
    pub const ALL: [NotificationMethod; 4] = [Self::Email, Self::Sms, Self::Push, Self::InApp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Push => "push",
            Self::InApp => "in-app",
        }
    }
}

impl FromStr for NotificationMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "push" => Ok(Self::Push),
            "in-app" | "in_app" | "inapp" => Ok(Self::InApp),
            other => Err(DomainError::UnknownNotificationMethod(other.to_string())),
        }
    }
}

impl fmt::Display for NotificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
