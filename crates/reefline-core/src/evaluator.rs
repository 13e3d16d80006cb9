//! Classifies water test readings against per-parameter threshold bands.
//!
//! Everything here is a pure function of its arguments. Bands are checked
//! widest first (critical, warning, ideal) with strict comparisons, so a
//! reading sitting exactly on a bound falls through to the next band.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::{AlertDraft, Direction, ParameterAlert, Severity};
use crate::ids::{AquariumId, UserId};
use crate::parameter::ParameterKind;
use crate::threshold::{Band, ParameterThreshold};
use crate::water_test::{ParameterReading, WaterTest};

/// Outcome of classifying a single reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breach {
    pub severity: Severity,
    pub direction: Direction,
    pub band: Band,
    /// The limit that was crossed, when it is known.
    pub bound: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[ParameterAlert]) -> Self {
        alerts.iter().fold(Self::default(), |mut summary, alert| {
            match alert.severity() {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
            summary.total += 1;
            summary
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDetection {
    pub alerts: Vec<ParameterAlert>,
    pub summary: AlertSummary,
}

pub fn classify_reading(value: f64, threshold: &ParameterThreshold) -> Option<Breach> {
    if let Some((direction, bound)) = threshold.critical().violation(value) {
        return Some(Breach {
            severity: Severity::Critical,
            direction,
            band: Band::Critical,
            bound: Some(bound),
        });
    }
    if let Some((direction, bound)) = threshold.warning().violation(value) {
        return Some(Breach {
            severity: Severity::High,
            direction,
            band: Band::Warning,
            bound: Some(bound),
        });
    }

    let ideal = threshold.ideal();
    ideal.violation(value)?;
    // Outside the ideal band the side is judged against ideal_min alone,
    // with a missing ideal_min read as zero.
    let direction = if value < ideal.min.unwrap_or(0.0) {
        Direction::Low
    } else {
        Direction::High
    };
    Some(Breach {
        severity: Severity::Medium,
        direction,
        band: Band::Ideal,
        bound: ideal.bound(direction),
    })
}

pub fn alert_title(severity: Severity, parameter_name: &str, direction: Direction) -> String {
    format!(
        "{} {} Level - {}",
        severity.label(),
        parameter_name,
        direction.label()
    )
}

pub fn alert_message(reading: &ParameterReading, breach: &Breach) -> String {
    let reading_text = with_unit(reading.value, &reading.unit);
    let detail = match breach.bound {
        Some(bound) => format!(
            "Current reading is {reading_text}, {} the {} limit of {}.",
            breach.direction.relation(),
            breach.band.as_str(),
            with_unit(bound, &reading.unit),
        ),
        None => format!("Current reading is {reading_text}, outside the ideal range."),
    };
    let remediation = ParameterKind::from_name(&reading.name).remediation(breach.severity);

    format!(
        "{} level is {} ({}). {detail} {remediation}",
        reading.name,
        breach.direction.as_str(),
        breach.severity.as_str(),
    )
}

pub(crate) fn with_unit(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{value} {unit}")
    }
}

/// Raise one alert per reading that breaches its matching enabled threshold.
///
/// Readings without a matching threshold (same name, same aquarium,
/// enabled) are skipped. Nothing is deduplicated against earlier runs.
pub fn detect_parameter_alerts(
    test: &WaterTest,
    thresholds: &[ParameterThreshold],
    aquarium_id: &AquariumId,
    user_id: &UserId,
    now: DateTime<Utc>,
) -> AlertDetection {
    let alerts: Vec<ParameterAlert> = test
        .parameters()
        .iter()
        .filter_map(|reading| {
            let threshold = thresholds.iter().find(|t| {
                t.enabled() && t.parameter_name() == reading.name && t.aquarium_id() == aquarium_id
            })?;
            let breach = classify_reading(reading.value, threshold)?;

            Some(ParameterAlert::new(
                AlertDraft {
                    aquarium_id: aquarium_id.clone(),
                    user_id: user_id.clone(),
                    threshold_id: threshold.id().clone(),
                    test_id: test.id().clone(),
                    parameter_name: reading.name.clone(),
                    parameter_value: reading.value,
                    unit: reading.unit.clone(),
                    severity: breach.severity,
                    direction: breach.direction,
                    title: alert_title(breach.severity, &reading.name, breach.direction),
                    message: alert_message(reading, &breach),
                },
                now,
            ))
        })
        .collect();

    let summary = AlertSummary::from_alerts(&alerts);
    AlertDetection { alerts, summary }
}
