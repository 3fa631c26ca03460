//! Error types
//!
//! Classification itself is total; these cover the edges around it:
//! building bands, drawing readings, replaying traces and rendering pages.

use thiserror::Error;

use crate::types::GlucoseLevel;

/// Invalid threshold band
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BandError {
    #[error("Band cutoffs must be finite (low={low}, high={high})")]
    NonFinite { low: GlucoseLevel, high: GlucoseLevel },

    #[error("Band low cutoff {low} must be below high cutoff {high}")]
    Inverted { low: GlucoseLevel, high: GlucoseLevel },
}

/// Rejected by `checked_classify`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("Reading is not a finite number: {0}")]
    NonFinite(GlucoseLevel),
}

/// Reading source failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Reading source exhausted")]
    Exhausted,

    #[error("Invalid sampling range [{min}, {max})")]
    InvalidRange { min: i64, max: i64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Invariant '{invariant}' violated for reading {reading} under {policy} policy")]
    InvariantViolated {
        invariant: &'static str,
        policy: String,
        reading: GlucoseLevel,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplayError {
    #[error("Invalid reading {reading} at step {step}")]
    InvalidReading { step: usize, reading: GlucoseLevel },

    #[error("Invariant '{invariant}' violated at step {step} (reading {reading})")]
    InvariantViolated {
        invariant: &'static str,
        step: usize,
        reading: GlucoseLevel,
    },
}

/// Profile form validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Age {age} outside {min}..={max}")]
    AgeOutOfRange { age: u8, min: u8, max: u8 },

    #[error("Weight {weight} kg outside {min}..={max} kg")]
    WeightOutOfRange { weight: u16, min: u16, max: u16 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Trend window is empty")]
    EmptyTrend,

    #[error("Trend date out of range: {start} + {offset} days")]
    DateOutOfRange { start: chrono::NaiveDate, offset: usize },
}
