use serde::{Deserialize, Serialize};

/// Which side of a band a reading fell out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    High,
    Low,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Low => "Low",
        }
    }

    pub fn relation(&self) -> &'static str {
        match self {
            Self::High => "above",
            Self::Low => "below",
        }
    }
}
