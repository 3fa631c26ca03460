//! # GlucoTrack simulator
//!
//! Threshold-based glucose alerting behind a simulated monitoring dashboard.
//!
//! - [`logic`]: the classifier, a pure mapping of (reading, policy) to severity and message
//! - [`source`]: injectable reading sources (random or scripted)
//! - [`dashboard`]: explicit dashboard state and page rendering
//! - [`simulator`] and [`replay`]: seeded simulation and fixed-trace replay,
//!   both checking [`invariants`] after every classification
//!
//! ```
//! use glucotrack_sim::logic::classify;
//! use glucotrack_sim::types::{AlertPolicy, Severity};
//!
//! let c = classify(145.0, &AlertPolicy::insights());
//! assert_eq!(c.severity, Severity::High);
//! ```

pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod invariants;
pub mod logic;
pub mod replay;
pub mod simulator;
pub mod source;
pub mod types;
