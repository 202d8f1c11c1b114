//! Threshold classifier turning soil metrics into a verdict.
//!
//! Rules are applied in order over a verdict that starts out healthy. Each
//! matching rule overwrites the status and advice, so a later rule wins over
//! an earlier one: salinity beats dryness.

use serde::Serialize;
use tracing::debug;

use super::metrics::SoilMetrics;

/// Brightness above which a low-variance photo reads as dry soil.
pub const DRY_BRIGHTNESS: f64 = 180.0;

/// Variance below which a bright photo reads as dry soil.
pub const DRY_VARIANCE: f64 = 2000.0;

/// Near-white ratio above which salt crust is suspected.
pub const SALINITY_RATIO: f64 = 0.08;

/// Coarse soil condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoilStatus {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "dry")]
    Dry,
    #[serde(rename = "salinity suspected")]
    SalinitySuspected,
}

impl SoilStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Dry => "dry",
            Self::SalinitySuspected => "salinity suspected",
        }
    }
}

/// Classification result plus the metrics that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilVerdict {
    pub status: SoilStatus,
    pub advice: &'static str,
    pub metrics: SoilMetrics,
}

/// An override applied when its predicate holds.
struct SoilRule {
    applies: fn(&SoilMetrics) -> bool,
    status: SoilStatus,
    advice: &'static str,
}

const HEALTHY_ADVICE: &str = "Soil looks fine. Maintain moisture and add compost for organic matter.";

static SOIL_RULES: &[SoilRule] = &[
    SoilRule {
        applies: |m| m.brightness > DRY_BRIGHTNESS && m.variance < DRY_VARIANCE,
        status: SoilStatus::Dry,
        advice: "Soil appears dry. Mulch and apply light, frequent irrigation.",
    },
    SoilRule {
        applies: |m| m.near_white_ratio > SALINITY_RATIO,
        status: SoilStatus::SalinitySuspected,
        advice: "White crust detected. Flush salts with good water; add gypsum if soil test confirms.",
    },
];

impl SoilVerdict {
    /// Classify a set of metrics. Pure: the verdict depends on nothing else.
    pub fn from_metrics(metrics: SoilMetrics) -> Self {
        let mut verdict = Self {
            status: SoilStatus::Healthy,
            advice: HEALTHY_ADVICE,
            metrics,
        };
        for rule in SOIL_RULES {
            if (rule.applies)(&metrics) {
                verdict.status = rule.status;
                verdict.advice = rule.advice;
            }
        }
        debug!(
            status = verdict.status.label(),
            brightness = metrics.brightness,
            variance = metrics.variance,
            near_white_ratio = metrics.near_white_ratio,
            "Soil classified"
        );
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(brightness: f64, variance: f64, near_white_ratio: f64) -> SoilMetrics {
        SoilMetrics {
            brightness,
            variance,
            near_white_ratio,
        }
    }

    fn status(brightness: f64, variance: f64, near_white_ratio: f64) -> SoilStatus {
        SoilVerdict::from_metrics(metrics(brightness, variance, near_white_ratio)).status
    }

    #[test]
    fn defaults_to_healthy() {
        let v = SoilVerdict::from_metrics(metrics(0.0, 0.0, 0.0));
        assert_eq!(v.status, SoilStatus::Healthy);
        assert_eq!(v.advice, HEALTHY_ADVICE);
    }

    #[test]
    fn bright_and_flat_is_dry() {
        let v = SoilVerdict::from_metrics(metrics(200.0, 1000.0, 0.0));
        assert_eq!(v.status, SoilStatus::Dry);
        assert!(v.advice.starts_with("Soil appears dry."));
    }

    #[test]
    fn dry_thresholds_are_strict() {
        assert_eq!(status(180.0, 1000.0, 0.0), SoilStatus::Healthy);
        assert_eq!(status(200.0, 2000.0, 0.0), SoilStatus::Healthy);
        assert_eq!(status(180.01, 1999.99, 0.0), SoilStatus::Dry);
    }

    #[test]
    fn bright_but_textured_is_healthy() {
        assert_eq!(status(220.0, 5000.0, 0.0), SoilStatus::Healthy);
    }

    #[test]
    fn salinity_threshold_is_strict() {
        assert_eq!(status(100.0, 5000.0, 0.08), SoilStatus::Healthy);
        assert_eq!(status(100.0, 5000.0, 0.081), SoilStatus::SalinitySuspected);
    }

    #[test]
    fn salinity_overrides_dry() {
        let v = SoilVerdict::from_metrics(metrics(250.0, 10.0, 0.5));
        assert_eq!(v.status, SoilStatus::SalinitySuspected);
        assert!(v.advice.starts_with("White crust detected."));
    }

    #[test]
    fn verdict_carries_its_metrics() {
        let m = metrics(12.5, 3.25, 0.0);
        assert_eq!(SoilVerdict::from_metrics(m).metrics, m);
    }

    #[test]
    fn status_serializes_like_reference() {
        assert_eq!(
            serde_json::to_value(SoilStatus::SalinitySuspected).unwrap(),
            "salinity suspected"
        );
        assert_eq!(serde_json::to_value(SoilStatus::Dry).unwrap(), "dry");
    }
}
