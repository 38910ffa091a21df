// Threshold-based urgency classification
use super::UrgencyPolicy;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use shared::models::Urgency;

/// Inclusive upper bounds: `n <= critical` is Critical, `critical < n <= warning`
/// is Warning, `warning < n <= caution` is Caution, anything above is Normal.
/// Warning and caution bands are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyThresholds {
    pub critical: i64,
    #[serde(default)]
    pub warning: Option<i64>,
    #[serde(default)]
    pub caution: Option<i64>,
}

impl UrgencyThresholds {
    pub fn new(critical: i64, warning: Option<i64>, caution: Option<i64>) -> Result<Self, EngineError> {
        let thresholds = UrgencyThresholds { critical, warning, caution };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Overdue or due today is critical, the coming week is a warning.
    pub fn weekly() -> Self {
        UrgencyThresholds { critical: 0, warning: Some(7), caution: None }
    }

    /// Overdue is critical, under 3 days a warning, under 6 days caution.
    pub fn staged() -> Self {
        UrgencyThresholds { critical: -1, warning: Some(2), caution: Some(5) }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "weekly" => Some(Self::weekly()),
            "staged" => Some(Self::staged()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let mut bound = self.critical;
        for (name, value) in [("warning", self.warning), ("caution", self.caution)] {
            if let Some(v) = value {
                if v < bound {
                    return Err(EngineError::Config(format!(
                        "urgency threshold '{}' ({}) is below the previous band ({})",
                        name, v, bound
                    )));
                }
                bound = v;
            }
        }
        Ok(())
    }
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self::weekly()
    }
}

impl UrgencyPolicy for UrgencyThresholds {
    fn name(&self) -> &str {
        "thresholds"
    }

    fn classify(&self, days_remaining: i64) -> Urgency {
        classify_urgency(days_remaining, self)
    }
}

pub fn classify_urgency(days_remaining: i64, thresholds: &UrgencyThresholds) -> Urgency {
    let within = |bound: Option<i64>| bound.is_some_and(|b| days_remaining <= b);

    if days_remaining <= thresholds.critical {
        Urgency::Critical
    } else if within(thresholds.warning) {
        Urgency::Warning
    } else if within(thresholds.caution) {
        Urgency::Caution
    } else {
        Urgency::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_bands() {
        let t = UrgencyThresholds::weekly();
        assert_eq!(t.classify(-4), Urgency::Critical);
        assert_eq!(t.classify(0), Urgency::Critical);
        assert_eq!(t.classify(1), Urgency::Warning);
        assert_eq!(t.classify(7), Urgency::Warning);
        assert_eq!(t.classify(8), Urgency::Normal);
    }

    #[test]
    fn test_staged_bands() {
        let t = UrgencyThresholds::staged();
        assert_eq!(t.classify(-1), Urgency::Critical);
        assert_eq!(t.classify(0), Urgency::Warning);
        assert_eq!(t.classify(2), Urgency::Warning);
        assert_eq!(t.classify(3), Urgency::Caution);
        assert_eq!(t.classify(5), Urgency::Caution);
        assert_eq!(t.classify(6), Urgency::Normal);
    }

    #[test]
    fn test_classification_is_monotonic() {
        let custom = UrgencyThresholds::new(3, None, Some(10)).unwrap();
        for t in [UrgencyThresholds::weekly(), UrgencyThresholds::staged(), custom] {
            for days in -30..30 {
                assert!(
                    t.classify(days) <= t.classify(days + 1),
                    "{:?}: {} days classified less urgent than {} days",
                    t,
                    days,
                    days + 1
                );
            }
        }
    }

    #[test]
    fn test_non_monotonic_thresholds_rejected() {
        assert!(UrgencyThresholds::new(5, Some(2), None).is_err());
        assert!(UrgencyThresholds::new(0, Some(7), Some(3)).is_err());
        assert!(UrgencyThresholds::new(0, None, Some(-2)).is_err());
        assert!(UrgencyThresholds::new(0, Some(0), Some(0)).is_ok());
    }

    #[test]
    fn test_presets_by_name() {
        assert_eq!(UrgencyThresholds::preset("Weekly"), Some(UrgencyThresholds::weekly()));
        assert_eq!(UrgencyThresholds::preset("staged"), Some(UrgencyThresholds::staged()));
        assert_eq!(UrgencyThresholds::preset("monthly"), None);
    }

    #[test]
    fn test_deserialize_optional_bands() {
        let t: UrgencyThresholds = serde_json::from_str(r#"{ "critical": 0 }"#).unwrap();
        assert_eq!(t.warning, None);
        assert_eq!(t.classify(1), Urgency::Normal);
    }
}
