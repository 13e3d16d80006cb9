use crate::alert::Severity;

/// Parameters with dedicated remediation advice. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Ammonia,
    Nitrite,
    Nitrate,
    Ph,
    Temperature,
    Other,
}

impl ParameterKind {
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "ammonia" => Self::Ammonia,
            "nitrite" => Self::Nitrite,
            "nitrate" => Self::Nitrate,
            "ph" => Self::Ph,
            "temperature" => Self::Temperature,
            _ => Self::Other,
        }
    }

    pub fn remediation(&self, severity: Severity) -> &'static str {
        match self {
            Self::Ammonia => {
                "Perform a 25-50% water change immediately and check for overfeeding or decaying matter."
            }
            Self::Nitrite => {
                "Perform a partial water change and dose a nitrite detoxifier while the biofilter catches up."
            }
            Self::Nitrate => "Increase water change volume and reduce feeding until levels drop.",
            Self::Ph => "Adjust pH slowly with a buffer and avoid swings of more than 0.2 per day.",
            Self::Temperature => {
                "Check the heater and thermostat and bring the temperature back gradually."
            }
            Self::Other if severity == Severity::Critical => {
                "Take corrective action immediately to protect your livestock."
            }
            Self::Other => "Monitor this parameter closely and take corrective action if it keeps drifting.",
        }
    }
}
