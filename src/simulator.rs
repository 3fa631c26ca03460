// Simulator — repeated render cycles over a reading source.
// Each cycle draws one reading, classifies it under both policies and checks
// every invariant. The result tallies severities per policy and counts the
// readings on which the two policies disagree.

use std::time::{Duration, Instant};

use crate::error::SimulationError;
use crate::invariants;
use crate::logic;
use crate::source::{RandomReadingSource, ReadingSource};
use crate::types::*;

/// One render cycle: a reading and its classification under each policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    pub reading: GlucoseLevel,
    pub insights: Classification,
    pub alert: Classification,
}

impl CycleOutcome {
    /// True when the two policies put the reading in different categories.
    pub fn diverges(&self) -> bool {
        self.insights.severity != self.alert.severity
    }
}

/// Count of classifications per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityTally {
    pub low: usize,
    pub normal: usize,
    pub high: usize,
}

impl SeverityTally {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Normal => self.normal += 1,
            Severity::High => self.high += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Low => self.low,
            Severity::Normal => self.normal,
            Severity::High => self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.normal + self.high
    }

    /// Share of the total in percent; 0 when nothing was recorded.
    pub fn percent(&self, severity: Severity) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(severity) as f64 * 100.0 / total as f64
        }
    }
}

fn classify_checked(
    reading: GlucoseLevel,
    policy: &AlertPolicy,
) -> Result<Classification, SimulationError> {
    let c = logic::checked_classify(reading, policy)?;
    invariants::check_invariants(policy, &c).map_err(|invariant| {
        SimulationError::InvariantViolated {
            invariant,
            policy: policy.variant.to_string(),
            reading,
        }
    })?;
    Ok(c)
}

/// Draw one reading and classify it under both policies.
pub fn run_cycle(
    source: &mut dyn ReadingSource,
    policies: &PolicySet,
) -> Result<CycleOutcome, SimulationError> {
    let reading = source.next_reading()?;
    Ok(CycleOutcome {
        reading,
        insights: classify_checked(reading, &policies.insights)?,
        alert: classify_checked(reading, &policies.alert)?,
    })
}

pub struct ViolationInfo {
    pub invariant: &'static str,
    pub policy: String,
    pub cycle: usize,
    pub reading: GlucoseLevel,
}

pub struct SimulationResult {
    pub cycles: usize,
    pub cycles_run: usize,
    pub seed: Option<u64>,
    pub elapsed: Duration,
    pub insights: SeverityTally,
    pub alert: SeverityTally,
    pub divergent: usize,
    pub violation: Option<ViolationInfo>,
}

/// Run up to `cycles` render cycles against any source.
/// Stops at the first invariant violation; other errors propagate.
pub fn run_with_source(
    source: &mut dyn ReadingSource,
    cycles: usize,
    policies: &PolicySet,
    verbose: bool,
) -> Result<SimulationResult, SimulationError> {
    let start = Instant::now();
    let mut insights = SeverityTally::default();
    let mut alert = SeverityTally::default();
    let mut divergent = 0;
    let mut violation = None;
    let mut cycles_run = 0;

    for cycle in 1..=cycles {
        let outcome = match run_cycle(source, policies) {
            Ok(outcome) => outcome,
            Err(SimulationError::InvariantViolated {
                invariant,
                policy,
                reading,
            }) => {
                tracing::warn!(invariant, %policy, reading, cycle, "invariant violated");
                violation = Some(ViolationInfo {
                    invariant,
                    policy,
                    cycle,
                    reading,
                });
                break;
            }
            Err(e) => return Err(e),
        };
        cycles_run = cycle;

        tracing::debug!(
            cycle,
            reading = outcome.reading,
            insights = %outcome.insights.severity,
            alert = %outcome.alert.severity,
            "cycle classified"
        );
        if verbose {
            println!("[Cycle {}] {} mg/dL", cycle, outcome.reading);
            println!("  insights: {}", outcome.insights);
            println!("  alert:    {}", outcome.alert);
        }

        insights.record(outcome.insights.severity);
        alert.record(outcome.alert.severity);
        if outcome.diverges() {
            divergent += 1;
        }
    }

    let result = SimulationResult {
        cycles,
        cycles_run,
        seed: None,
        elapsed: start.elapsed(),
        insights,
        alert,
        divergent,
        violation,
    };
    tracing::info!(
        cycles_run = result.cycles_run,
        divergent = result.divergent,
        "simulation finished"
    );
    Ok(result)
}

/// Run a seeded simulation with readings drawn uniformly from `range`.
pub fn run_simulation(
    cycles: usize,
    seed: u64,
    verbose: bool,
    policies: &PolicySet,
    range: (i64, i64),
) -> Result<SimulationResult, SimulationError> {
    let mut source = RandomReadingSource::seeded(seed, range)?;
    let mut result = run_with_source(&mut source, cycles, policies, verbose)?;
    result.seed = Some(seed);
    Ok(result)
}

impl std::fmt::Display for SeverityTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for severity in Severity::ALL {
            write!(
                f,
                "{}={} ({:.1}%) ",
                severity,
                self.get(severity),
                self.percent(severity)
            )?;
        }
        Ok(())
    }
}

impl std::fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        match &self.violation {
            None => {
                writeln!(
                    f,
                    "[ok] No violation found in {} of {} cycles ({}ms).",
                    self.cycles_run,
                    self.cycles,
                    self.elapsed.as_millis(),
                )?;
            }
            Some(v) => {
                writeln!(
                    f,
                    "[VIOLATION] Invariant '{}' violated under {} policy at cycle {} (reading {} mg/dL).",
                    v.invariant, v.policy, v.cycle, v.reading,
                )?;
            }
        }
        writeln!(f, "Insights policy:      {}", self.insights)?;
        writeln!(f, "Alert-sidebar policy: {}", self.alert)?;
        writeln!(
            f,
            "Policies disagreed on {} of {} readings.",
            self.divergent, self.cycles_run
        )?;
        match self.seed {
            Some(seed) => writeln!(f, "Seed: {}", seed),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::error::SourceError;
    use crate::source::ScriptedReadingSource;

    #[test]
    fn test_run_cycle_classifies_both_policies() {
        let mut source = ScriptedReadingSource::new([150.0]);
        let outcome = run_cycle(&mut source, &PolicySet::default()).unwrap();
        assert_eq!(outcome.insights.severity, Severity::High);
        assert_eq!(outcome.alert.severity, Severity::Normal);
        assert!(outcome.diverges());
    }

    #[test]
    fn test_run_cycle_rejects_nan() {
        let mut source = ScriptedReadingSource::new([f64::NAN]);
        assert!(matches!(
            run_cycle(&mut source, &PolicySet::default()),
            Err(SimulationError::Classify(_))
        ));
    }

    #[test]
    fn test_tallies_and_divergence() {
        let mut source = ScriptedReadingSource::new([60.0, 75.0, 100.0, 150.0, 200.0]);
        let result = run_with_source(&mut source, 5, &PolicySet::default(), false).unwrap();
        assert!(result.violation.is_none());
        assert_eq!(result.cycles_run, 5);
        assert_eq!(
            result.insights,
            SeverityTally {
                low: 2,
                normal: 1,
                high: 2
            }
        );
        assert_eq!(
            result.alert,
            SeverityTally {
                low: 1,
                normal: 3,
                high: 1
            }
        );
        // 75 and 150 are classified differently
        assert_eq!(result.divergent, 2);
    }

    #[test]
    fn test_exhausted_source_propagates() {
        let mut source = ScriptedReadingSource::new([100.0]);
        assert!(matches!(
            run_with_source(&mut source, 3, &PolicySet::default(), false),
            Err(SimulationError::Source(SourceError::Exhausted))
        ));
    }

    #[test]
    fn test_seeded_simulation_is_clean_and_reproducible() {
        let policies = PolicySet::default();
        let a = run_simulation(500, 99, false, &policies, LIVE_READING_RANGE).unwrap();
        let b = run_simulation(500, 99, false, &policies, LIVE_READING_RANGE).unwrap();
        assert!(a.violation.is_none());
        assert_eq!(a.cycles_run, 500);
        assert_eq!(a.insights, b.insights);
        assert_eq!(a.alert, b.alert);
        // Live readings never exceed 149, so the sidebar never fires High
        assert_eq!(a.alert.high, 0);
        assert_eq!(a.alert.low, 0);
        assert!(a.to_string().contains("Seed: 99"));
    }

    #[test]
    fn test_tally_percent() {
        let mut tally = SeverityTally::default();
        assert_eq!(tally.percent(Severity::High), 0.0);
        tally.record(Severity::High);
        tally.record(Severity::Normal);
        tally.record(Severity::Normal);
        tally.record(Severity::Normal);
        assert_eq!(tally.percent(Severity::High), 25.0);
        assert_eq!(tally.percent(Severity::Normal), 75.0);
    }
}
