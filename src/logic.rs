// Pure functions — the glucose classifier and its message tables.
// Nothing here holds state; every call is a fresh mapping of (reading, policy).

use crate::constants::*;
use crate::error::ClassifyError;
use crate::types::*;

/// Compare a reading against a band. Both cutoffs count as Normal.
/// NaN compares false on both sides and therefore lands on Normal.
pub fn severity_for(reading: GlucoseLevel, band: &ThresholdBand) -> Severity {
    if reading > band.high {
        Severity::High
    } else if reading < band.low {
        Severity::Low
    } else {
        Severity::Normal
    }
}

/// Message table for a policy variant.
pub fn message_for(variant: PolicyVariant, severity: Severity) -> &'static str {
    match (variant, severity) {
        (PolicyVariant::Insights, Severity::High) => INSIGHTS_HIGH_MESSAGE,
        (PolicyVariant::Insights, Severity::Low) => INSIGHTS_LOW_MESSAGE,
        (PolicyVariant::Insights, Severity::Normal) => INSIGHTS_NORMAL_MESSAGE,
        (PolicyVariant::AlertSidebar, Severity::High) => ALERT_HIGH_MESSAGE,
        (PolicyVariant::AlertSidebar, Severity::Low) => ALERT_LOW_MESSAGE,
        (PolicyVariant::AlertSidebar, Severity::Normal) => ALERT_NORMAL_MESSAGE,
    }
}

/// Recommendation step. Runs against its own band, which need not
/// match the band used for the alert itself.
pub fn recommend(reading: GlucoseLevel, band: &ThresholdBand) -> &'static str {
    match severity_for(reading, band) {
        Severity::High => RECOMMEND_HIGH,
        Severity::Low => RECOMMEND_LOW,
        Severity::Normal => RECOMMEND_NORMAL,
    }
}

pub fn tone_for(severity: Severity) -> Tone {
    match severity {
        Severity::Normal => Tone::Success,
        Severity::Low => Tone::Warning,
        Severity::High => Tone::Error,
    }
}

/// Classify a reading under a policy. Total over all f64 values.
pub fn classify(reading: GlucoseLevel, policy: &AlertPolicy) -> Classification {
    let severity = severity_for(reading, &policy.band);
    Classification {
        reading,
        severity,
        message: message_for(policy.variant, severity),
        recommendation: policy.advisory_band.map(|band| recommend(reading, &band)),
    }
}

/// Like `classify`, but rejects NaN and infinities.
pub fn checked_classify(
    reading: GlucoseLevel,
    policy: &AlertPolicy,
) -> Result<Classification, ClassifyError> {
    if !reading.is_finite() {
        return Err(ClassifyError::NonFinite(reading));
    }
    Ok(classify(reading, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insights(reading: GlucoseLevel) -> Severity {
        classify(reading, &AlertPolicy::insights()).severity
    }

    fn alert(reading: GlucoseLevel) -> Severity {
        classify(reading, &AlertPolicy::alert_sidebar()).severity
    }

    #[test]
    fn test_insights_bands() {
        for r in 80..=140 {
            assert_eq!(insights(r as f64), Severity::Normal, "reading {}", r);
        }
        for r in [141.0, 145.0, 200.0, 1e6] {
            assert_eq!(insights(r), Severity::High);
        }
        for r in [79.0, 75.0, 0.0, -20.0] {
            assert_eq!(insights(r), Severity::Low);
        }
    }

    #[test]
    fn test_insights_boundaries() {
        assert_eq!(insights(140.0), Severity::Normal);
        assert_eq!(insights(141.0), Severity::High);
        assert_eq!(insights(80.0), Severity::Normal);
        assert_eq!(insights(79.0), Severity::Low);
        // Fractional readings just past a cutoff leave the normal range
        assert_eq!(insights(140.01), Severity::High);
        assert_eq!(insights(79.99), Severity::Low);
    }

    #[test]
    fn test_alert_sidebar_bands() {
        for r in 70..=180 {
            assert_eq!(alert(r as f64), Severity::Normal, "reading {}", r);
        }
        assert_eq!(alert(181.0), Severity::High);
        assert_eq!(alert(69.0), Severity::Low);
    }

    #[test]
    fn test_normal_iff_band_contains() {
        for band in [ThresholdBand::insights(), ThresholdBand::alert_sidebar()] {
            for r in (0..400).map(|r| r as f64 * 0.5) {
                assert_eq!(severity_for(r, &band) == Severity::Normal, band.contains(r));
            }
        }
    }

    #[test]
    fn test_variants_disagree_between_bands() {
        // 150 is high for insights but normal for the sidebar
        assert_eq!(insights(150.0), Severity::High);
        assert_eq!(alert(150.0), Severity::Normal);
        // 75 is low for insights but normal for the sidebar
        assert_eq!(insights(75.0), Severity::Low);
        assert_eq!(alert(75.0), Severity::Normal);
    }

    #[test]
    fn test_scenario_messages() {
        let high = classify(145.0, &AlertPolicy::insights());
        assert_eq!(high.severity, Severity::High);
        assert!(high.message.contains("Immediate action required"));
        assert_eq!(high.recommendation, None);

        let low = classify(75.0, &AlertPolicy::insights());
        assert_eq!(low.severity, Severity::Low);
        assert!(low.message.contains("Consider eating"));

        let sidebar = classify(200.0, &AlertPolicy::alert_sidebar());
        assert_eq!(sidebar.severity, Severity::High);
        assert_eq!(sidebar.message, ALERT_HIGH_MESSAGE);
        assert_eq!(sidebar.recommendation, Some(RECOMMEND_HIGH));
    }

    #[test]
    fn test_classify_is_idempotent() {
        for policy in [AlertPolicy::insights(), AlertPolicy::alert_sidebar()] {
            for r in [0.0, 69.5, 80.0, 120.0, 140.0, 181.0, 400.0] {
                assert_eq!(classify(r, &policy), classify(r, &policy));
            }
        }
    }

    #[test]
    fn test_recommendation_uses_its_own_band() {
        let policy = AlertPolicy {
            advisory_band: Some(ThresholdBand::new(90.0, 130.0).unwrap()),
            ..AlertPolicy::alert_sidebar()
        };
        let c = classify(150.0, &policy);
        assert_eq!(c.severity, Severity::Normal);
        assert_eq!(c.recommendation, Some(RECOMMEND_HIGH));
    }

    #[test]
    fn test_nan_is_total_but_checked_rejects() {
        let policy = AlertPolicy::insights();
        assert_eq!(classify(f64::NAN, &policy).severity, Severity::Normal);
        assert!(matches!(
            checked_classify(f64::NAN, &policy),
            Err(ClassifyError::NonFinite(_))
        ));
        assert_eq!(
            checked_classify(f64::INFINITY, &policy),
            Err(ClassifyError::NonFinite(f64::INFINITY))
        );
        assert_eq!(
            checked_classify(100.0, &policy).unwrap(),
            classify(100.0, &policy)
        );
    }

    #[test]
    fn test_tone_for() {
        assert_eq!(tone_for(Severity::Normal), Tone::Success);
        assert_eq!(tone_for(Severity::Low), Tone::Warning);
        assert_eq!(tone_for(Severity::High), Tone::Error);
    }

    #[test]
    fn test_band_validation() {
        assert!(ThresholdBand::new(70.0, 180.0).is_ok());
        assert!(matches!(
            ThresholdBand::new(140.0, 80.0),
            Err(crate::error::BandError::Inverted { .. })
        ));
        assert!(matches!(
            ThresholdBand::new(f64::NAN, 80.0),
            Err(crate::error::BandError::NonFinite { .. })
        ));
    }
}
