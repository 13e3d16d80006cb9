pub mod defaults;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::Direction;
use crate::error::DomainError;
use crate::ids::{AquariumId, ThresholdId};
use crate::notification::NotificationMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Ideal,
    Warning,
    Critical,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ideal => "ideal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Optional lower and upper limit of one band. A missing side never triggers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn max_only(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Strict comparison; a value equal to a bound is inside it. NaN never violates.
    pub fn violation(&self, value: f64) -> Option<(Direction, f64)> {
        if let Some(min) = self.min.filter(|min| value < *min) {
            return Some((Direction::Low, min));
        }
        if let Some(max) = self.max.filter(|max| value > *max) {
            return Some((Direction::High, max));
        }
        None
    }

    pub fn bound(&self, direction: Direction) -> Option<f64> {
        match direction {
            Direction::Low => self.min,
            Direction::High => self.max,
        }
    }

    fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterThreshold {
    id: ThresholdId,
    aquarium_id: AquariumId,
    parameter_name: String,
    ideal: Bounds,
    warning: Bounds,
    critical: Bounds,
    enabled: bool,
    notification_methods: Vec<NotificationMethod>,
    snooze_until: Option<DateTime<Utc>>,
}

impl ParameterThreshold {
    pub fn new(
        aquarium_id: AquariumId,
        parameter_name: impl Into<String>,
        notification_methods: Vec<NotificationMethod>,
    ) -> Self {
        let mut methods = Vec::with_capacity(notification_methods.len());
        for method in notification_methods {
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
        Self {
            id: ThresholdId::new(),
            aquarium_id,
            parameter_name: parameter_name.into(),
            ideal: Bounds::default(),
            warning: Bounds::default(),
            critical: Bounds::default(),
            enabled: true,
            notification_methods: methods,
            snooze_until: None,
        }
    }

    pub fn with_ideal(mut self, bounds: Bounds) -> Self {
        self.ideal = bounds;
        self
    }

    pub fn with_warning(mut self, bounds: Bounds) -> Self {
        self.warning = bounds;
        self
    }

    pub fn with_critical(mut self, bounds: Bounds) -> Self {
        self.critical = bounds;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn snooze(&mut self, until: DateTime<Utc>) {
        self.snooze_until = Some(until);
    }

    pub fn unsnooze(&mut self) {
        self.snooze_until = None;
    }

    pub fn is_snoozed(&self, now: DateTime<Utc>) -> bool {
        self.snooze_until.is_some_and(|until| until > now)
    }

    /// Checks the configuration precondition the evaluator assumes: every
    /// defined bound sits strictly inside the next wider band's bound on the
    /// same side. The evaluator itself never calls this.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.parameter_name.trim().is_empty() {
            return Err(DomainError::ThresholdRequiresParameter);
        }
        for (band, bounds) in [
            (Band::Ideal, &self.ideal),
            (Band::Warning, &self.warning),
            (Band::Critical, &self.critical),
        ] {
            if bounds.is_inverted() {
                return Err(DomainError::InvertedBand {
                    parameter: self.parameter_name.clone(),
                    band: band.as_str(),
                });
            }
        }

        let mins = [self.ideal.min, self.warning.min, self.critical.min];
        let maxes = [self.ideal.max, self.warning.max, self.critical.max];
        let mins_widen = strictly_widening(&mins, |inner, outer| outer < inner);
        let maxes_widen = strictly_widening(&maxes, |inner, outer| outer > inner);
        if !(mins_widen && maxes_widen) {
            return Err(DomainError::BandsNotNested {
                parameter: self.parameter_name.clone(),
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &ThresholdId {
        &self.id
    }

    pub fn aquarium_id(&self) -> &AquariumId {
        &self.aquarium_id
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn ideal(&self) -> &Bounds {
        &self.ideal
    }

    pub fn warning(&self) -> &Bounds {
        &self.warning
    }

    pub fn critical(&self) -> &Bounds {
        &self.critical
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn notification_methods(&self) -> &[NotificationMethod] {
        &self.notification_methods
    }

    pub fn snooze_until(&self) -> Option<DateTime<Utc>> {
        self.snooze_until
    }
}

/// Bounds are listed innermost first; undefined ones are skipped.
fn strictly_widening(bounds: &[Option<f64>], wider: impl Fn(f64, f64) -> bool) -> bool {
    let defined: Vec<f64> = bounds.iter().flatten().copied().collect();
    defined.windows(2).all(|pair| wider(pair[0], pair[1]))
}
