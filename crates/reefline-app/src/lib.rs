pub mod alert_service;
pub mod error;
pub mod threshold_service;
