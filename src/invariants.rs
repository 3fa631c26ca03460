// Classification invariants — checked after every simulated cycle and replay step.

use crate::logic::{classify, message_for, recommend, severity_for};
use crate::types::*;

/// The stored severity is what the policy's band says it should be.
pub fn severity_matches_band(policy: &AlertPolicy, c: &Classification) -> bool {
    c.severity == severity_for(c.reading, &policy.band)
}

/// The message comes from the policy variant's table for that severity.
pub fn message_matches_severity(policy: &AlertPolicy, c: &Classification) -> bool {
    c.message == message_for(policy.variant, c.severity)
}

/// A recommendation is present exactly when the policy has an advisory band.
pub fn recommendation_matches_policy(policy: &AlertPolicy, c: &Classification) -> bool {
    match (policy.advisory_band, c.recommendation) {
        (Some(band), Some(text)) => text == recommend(c.reading, &band),
        (None, None) => true,
        _ => false,
    }
}

/// Classifying the same reading again yields the same result.
pub fn classification_is_deterministic(policy: &AlertPolicy, c: &Classification) -> bool {
    let again = classify(c.reading, policy);
    again.severity == c.severity
        && again.message == c.message
        && again.recommendation == c.recommendation
}

type Check = fn(&AlertPolicy, &Classification) -> bool;

/// All individual invariants with names for reporting.
pub const ALL_INVARIANTS: &[(&str, Check)] = &[
    ("severityMatchesBand", severity_matches_band),
    ("messageMatchesSeverity", message_matches_severity),
    ("recommendationMatchesPolicy", recommendation_matches_policy),
    ("classificationIsDeterministic", classification_is_deterministic),
];

pub fn all_hold(policy: &AlertPolicy, c: &Classification) -> bool {
    ALL_INVARIANTS.iter().all(|(_, check)| check(policy, c))
}

/// Check all invariants and return the name of the first violated one, if any.
pub fn check_invariants(policy: &AlertPolicy, c: &Classification) -> Result<(), &'static str> {
    for (name, check) in ALL_INVARIANTS {
        if !check(policy, c) {
            return Err(*name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    #[test]
    fn test_fresh_classifications_hold() {
        for policy in [AlertPolicy::insights(), AlertPolicy::alert_sidebar()] {
            for r in [50.0, 79.0, 80.0, 140.0, 141.0, 181.0] {
                let c = classify(r, &policy);
                assert!(all_hold(&policy, &c));
                assert_eq!(check_invariants(&policy, &c), Ok(()));
            }
        }
    }

    #[test]
    fn test_wrong_severity_detected() {
        let policy = AlertPolicy::insights();
        let tampered = Classification {
            severity: Severity::Normal,
            ..classify(145.0, &policy)
        };
        assert_eq!(check_invariants(&policy, &tampered), Err("severityMatchesBand"));
    }

    #[test]
    fn test_message_from_other_variant_detected() {
        let policy = AlertPolicy::insights();
        let tampered = Classification {
            message: ALERT_HIGH_MESSAGE,
            ..classify(145.0, &policy)
        };
        assert_eq!(
            check_invariants(&policy, &tampered),
            Err("messageMatchesSeverity")
        );
    }

    #[test]
    fn test_missing_recommendation_detected() {
        let policy = AlertPolicy::alert_sidebar();
        let tampered = Classification {
            recommendation: None,
            ..classify(200.0, &policy)
        };
        assert!(!recommendation_matches_policy(&policy, &tampered));

        // Insights policy has no advisory step, so any recommendation is wrong
        let insights = AlertPolicy::insights();
        let extra = Classification {
            recommendation: Some(RECOMMEND_NORMAL),
            ..classify(100.0, &insights)
        };
        assert_eq!(
            check_invariants(&insights, &extra),
            Err("recommendationMatchesPolicy")
        );
    }
}
