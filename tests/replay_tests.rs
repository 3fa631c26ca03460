// Integration tests — deterministic replay of fixed reading traces.
// Each test replays a hardcoded reading sequence and asserts the classifications.

use glucotrack_sim::constants::*;
use glucotrack_sim::error::ReplayError;
use glucotrack_sim::replay::{replay_trace, severities};
use glucotrack_sim::types::*;

use glucotrack_sim::types::Severity::{High, Low, Normal};

/// 1. Insights band edges: both cutoffs stay Normal, one past them leaves it
#[test]
fn trace_insights_boundaries() {
    let readings = [79.0, 80.0, 81.0, 139.0, 140.0, 141.0];
    let trace = replay_trace(&AlertPolicy::insights(), &readings).unwrap();

    assert_eq!(
        severities(&trace),
        vec![Low, Normal, Normal, Normal, Normal, High]
    );
    assert!(trace.iter().all(|c| c.recommendation.is_none()));
}

/// 2. Alert-sidebar band edges, with the recommendation step alongside
#[test]
fn trace_alert_sidebar_boundaries() {
    let readings = [69.0, 70.0, 180.0, 181.0];
    let trace = replay_trace(&AlertPolicy::alert_sidebar(), &readings).unwrap();

    assert_eq!(severities(&trace), vec![Low, Normal, Normal, High]);
    assert_eq!(trace[0].message, ALERT_LOW_MESSAGE);
    assert_eq!(trace[0].recommendation, Some(RECOMMEND_LOW));
    assert_eq!(trace[2].message, ALERT_NORMAL_MESSAGE);
    assert_eq!(trace[3].recommendation, Some(RECOMMEND_HIGH));
}

/// 3. The scenarios from the dashboard: 145 and 75 on insights, 200 on the sidebar
#[test]
fn trace_dashboard_scenarios() {
    let insights = replay_trace(&AlertPolicy::insights(), &[145.0, 75.0]).unwrap();
    assert_eq!(insights[0].severity, High);
    assert!(insights[0].message.contains("Immediate action required"));
    assert_eq!(insights[1].severity, Low);
    assert!(insights[1].message.contains("Consider eating"));

    let sidebar = replay_trace(&AlertPolicy::alert_sidebar(), &[200.0]).unwrap();
    assert_eq!(sidebar[0].severity, High);
    assert_eq!(sidebar[0].message, ALERT_HIGH_MESSAGE);
}

/// 4. Same trace under both policies: they disagree between the two bands
#[test]
fn trace_policies_diverge_between_bands() {
    let readings = [72.0, 100.0, 160.0, 190.0];
    let a = replay_trace(&AlertPolicy::insights(), &readings).unwrap();
    let b = replay_trace(&AlertPolicy::alert_sidebar(), &readings).unwrap();

    assert_eq!(severities(&a), vec![Low, Normal, High, High]);
    assert_eq!(severities(&b), vec![Normal, Normal, Normal, High]);
}

/// 5. Replaying twice gives identical results
#[test]
fn trace_replay_is_repeatable() {
    let readings = [55.0, 90.0, 130.0, 145.0, 210.0, -3.0, 1_000.0];
    for policy in [AlertPolicy::insights(), AlertPolicy::alert_sidebar()] {
        let first = replay_trace(&policy, &readings).unwrap();
        let second = replay_trace(&policy, &readings).unwrap();
        assert_eq!(first, second);
    }
}

/// 6. A non-finite reading stops the replay at its step
#[test]
fn trace_rejects_non_finite_reading() {
    let err = replay_trace(&AlertPolicy::insights(), &[100.0, 120.0, f64::INFINITY]).unwrap_err();
    assert_eq!(
        err,
        ReplayError::InvalidReading {
            step: 2,
            reading: f64::INFINITY
        }
    );
}

/// 7. A configured band is honoured without changing the message table
#[test]
fn trace_custom_band() {
    let policy = AlertPolicy {
        band: ThresholdBand::new(70.0, 140.0).unwrap(),
        ..AlertPolicy::insights()
    };
    let trace = replay_trace(&policy, &[75.0, 141.0]).unwrap();
    assert_eq!(severities(&trace), vec![Normal, High]);
    assert_eq!(trace[1].message, INSIGHTS_HIGH_MESSAGE);
}
