// Types — readings, threshold bands, alert policies and classification results.

use crate::constants::*;
use crate::error::BandError;

/// A single glucose measurement in mg/dL.
pub type GlucoseLevel = f64;

/// Classification outcome for a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Low,
    Normal,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Normal, Severity::High, Severity::Low];
}

/// Display tone the dashboard uses for a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

/// The (low, high) cutoff pair defining the normal range.
/// Both cutoffs belong to the normal side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBand {
    pub low: GlucoseLevel,
    pub high: GlucoseLevel,
}

impl ThresholdBand {
    /// Build a band, rejecting non-finite or inverted cutoffs.
    pub fn new(low: GlucoseLevel, high: GlucoseLevel) -> Result<Self, BandError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(BandError::NonFinite { low, high });
        }
        if low >= high {
            return Err(BandError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    /// Band used by the data-insights view.
    pub const fn insights() -> Self {
        Self {
            low: INSIGHTS_LOW,
            high: INSIGHTS_HIGH,
        }
    }

    /// Band used by the alert sidebar and its recommendation step.
    pub const fn alert_sidebar() -> Self {
        Self {
            low: ALERT_LOW,
            high: ALERT_HIGH,
        }
    }

    pub fn contains(&self, reading: GlucoseLevel) -> bool {
        reading >= self.low && reading <= self.high
    }
}

/// Which message table a policy speaks with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyVariant {
    Insights,
    AlertSidebar,
}

impl std::str::FromStr for PolicyVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insights" | "a" => Ok(PolicyVariant::Insights),
            "alert" | "alert-sidebar" | "alert_sidebar" | "b" => Ok(PolicyVariant::AlertSidebar),
            other => Err(format!("unknown policy '{}': expected insights or alert", other)),
        }
    }
}

/// A named alerting configuration: message table, band and optional
/// recommendation band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertPolicy {
    pub variant: PolicyVariant,
    pub band: ThresholdBand,
    pub advisory_band: Option<ThresholdBand>,
}

impl AlertPolicy {
    pub const fn insights() -> Self {
        Self {
            variant: PolicyVariant::Insights,
            band: ThresholdBand::insights(),
            advisory_band: None,
        }
    }

    pub const fn alert_sidebar() -> Self {
        Self {
            variant: PolicyVariant::AlertSidebar,
            band: ThresholdBand::alert_sidebar(),
            advisory_band: Some(ThresholdBand::alert_sidebar()),
        }
    }

    pub fn for_variant(variant: PolicyVariant) -> Self {
        match variant {
            PolicyVariant::Insights => Self::insights(),
            PolicyVariant::AlertSidebar => Self::alert_sidebar(),
        }
    }
}

/// Result of classifying one reading under one policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub reading: GlucoseLevel,
    pub severity: Severity,
    pub message: &'static str,
    pub recommendation: Option<&'static str>,
}

/// Both policies the dashboard evaluates on every refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicySet {
    pub insights: AlertPolicy,
    pub alert: AlertPolicy,
}

impl Default for PolicySet {
    fn default() -> Self {
        Self {
            insights: AlertPolicy::insights(),
            alert: AlertPolicy::alert_sidebar(),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tone::Success => write!(f, "[ok]"),
            Tone::Warning => write!(f, "[warning]"),
            Tone::Error => write!(f, "[ALERT]"),
        }
    }
}

impl std::fmt::Display for PolicyVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyVariant::Insights => write!(f, "insights"),
            PolicyVariant::AlertSidebar => write!(f, "alert-sidebar"),
        }
    }
}

impl std::fmt::Display for ThresholdBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} mg/dL", self.low, self.high)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} mg/dL: {}", self.severity, self.reading, self.message)?;
        if let Some(rec) = self.recommendation {
            write!(f, " ({})", rec)?;
        }
        Ok(())
    }
}
