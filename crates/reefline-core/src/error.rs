use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("{parameter}: {band} band has min above max")]
    InvertedBand { parameter: String, band: &'static str },
    #[error("{parameter}: bands must nest ideal inside warning inside critical")]
    BandsNotNested { parameter: String },
    #[error("threshold requires a parameter name")]
    ThresholdRequiresParameter,
    #[error("unknown notification method: {0}")]
    UnknownNotificationMethod(String),
}
