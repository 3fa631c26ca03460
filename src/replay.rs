// Deterministic trace replay.
// Classifies a fixed sequence of readings under one policy, checking every
// invariant along the way, so scenarios can be pinned down in tests.

use crate::error::ReplayError;
use crate::invariants;
use crate::logic;
use crate::types::*;

/// Classify a single replay step.
pub fn apply_reading(
    policy: &AlertPolicy,
    step: usize,
    reading: GlucoseLevel,
) -> Result<Classification, ReplayError> {
    let c = logic::checked_classify(reading, policy)
        .map_err(|_| ReplayError::InvalidReading { step, reading })?;

    invariants::check_invariants(policy, &c).map_err(|invariant| {
        ReplayError::InvariantViolated {
            invariant,
            step,
            reading,
        }
    })?;

    Ok(c)
}

/// Replay a full trace of readings, returning one classification per step.
pub fn replay_trace(
    policy: &AlertPolicy,
    readings: &[GlucoseLevel],
) -> Result<Vec<Classification>, ReplayError> {
    readings
        .iter()
        .enumerate()
        .map(|(step, &reading)| apply_reading(policy, step, reading))
        .collect()
}

/// Severities along a trace, for compact assertions.
pub fn severities(trace: &[Classification]) -> Vec<Severity> {
    trace.iter().map(|c| c.severity).collect()
}
