use reefline_core::ids::UserId;
use reefline_core::notification::NotificationMethod;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://reefline.db?mode=rwc";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Identity stamped onto alerts raised from this process.
    pub user_id: UserId,
    /// Channels configured on thresholds created by `seed`.
    pub notify_methods: Vec<NotificationMethod>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("REEFLINE_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let raw_user = lookup("REEFLINE_USER_ID")
            .ok_or_else(|| ConfigError::MissingEnvVar("REEFLINE_USER_ID".to_string()))?;
        let user_id = UserId::parse(&raw_user).map_err(|e| ConfigError::InvalidValue {
            var: "REEFLINE_USER_ID".to_string(),
            reason: e.to_string(),
        })?;

        let notify_methods = match lookup("REEFLINE_NOTIFY_METHODS") {
            Some(raw) => raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<NotificationMethod>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ConfigError::InvalidValue {
                    var: "REEFLINE_NOTIFY_METHODS".to_string(),
                    reason: e.to_string(),
                })?,
            None => vec![NotificationMethod::InApp],
        };

        Ok(Self {
            database_url,
            user_id,
            notify_methods,
        })
    }
}
