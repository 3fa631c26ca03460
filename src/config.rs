//! Configuration
//!
//! Loads threshold bands, simulation defaults, the dashboard profile and
//! logging settings from a TOML file, with environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::dashboard::{DiabetesType, Profile};
use crate::error::{BandError, ProfileError};
use crate::types::{AlertPolicy, PolicySet, PolicyVariant, ThresholdBand};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Raw band as written in the file; validated by `ThresholdBand::new`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BandConfig {
    pub low: f64,
    pub high: f64,
}

impl BandConfig {
    pub fn validate(&self) -> Result<ThresholdBand, BandError> {
        ThresholdBand::new(self.low, self.high)
    }
}

impl From<ThresholdBand> for BandConfig {
    fn from(band: ThresholdBand) -> Self {
        Self {
            low: band.low,
            high: band.high,
        }
    }
}

/// The two alert policies plus the sidebar's recommendation band
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_insights_band")]
    pub insights: BandConfig,

    #[serde(default = "default_alert_band")]
    pub alert: BandConfig,

    #[serde(default = "default_alert_band")]
    pub advisory: BandConfig,
}

fn default_insights_band() -> BandConfig {
    ThresholdBand::insights().into()
}

fn default_alert_band() -> BandConfig {
    ThresholdBand::alert_sidebar().into()
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            insights: default_insights_band(),
            alert: default_alert_band(),
            advisory: default_alert_band(),
        }
    }
}

impl ThresholdsConfig {
    /// Build both policies, validating every band.
    pub fn policies(&self) -> Result<PolicySet, BandError> {
        Ok(PolicySet {
            insights: AlertPolicy {
                band: self.insights.validate()?,
                ..AlertPolicy::for_variant(PolicyVariant::Insights)
            },
            alert: AlertPolicy {
                band: self.alert.validate()?,
                advisory_band: Some(self.advisory.validate()?),
                ..AlertPolicy::for_variant(PolicyVariant::AlertSidebar)
            },
        })
    }
}

/// Simulation defaults
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_cycles")]
    pub cycles: usize,

    pub seed: Option<u64>,

    #[serde(default = "default_reading_min")]
    pub reading_min: i64,

    #[serde(default = "default_reading_max")]
    pub reading_max: i64,
}

fn default_cycles() -> usize {
    1000
}

fn default_reading_min() -> i64 {
    LIVE_READING_RANGE.0
}

fn default_reading_max() -> i64 {
    LIVE_READING_RANGE.1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cycles: default_cycles(),
            seed: None,
            reading_min: default_reading_min(),
            reading_max: default_reading_max(),
        }
    }
}

impl SimulationConfig {
    pub fn range(&self) -> (i64, i64) {
        (self.reading_min, self.reading_max)
    }
}

/// Profile form defaults
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_profile_name")]
    pub name: String,

    #[serde(default = "default_age")]
    pub age: u8,

    #[serde(default = "default_weight")]
    pub weight_kg: u16,

    #[serde(default = "default_diabetes_type")]
    pub diabetes_type: DiabetesType,
}

fn default_profile_name() -> String {
    "John Doe".to_string()
}

fn default_age() -> u8 {
    30
}

fn default_weight() -> u16 {
    70
}

fn default_diabetes_type() -> DiabetesType {
    DiabetesType::Type1
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            age: default_age(),
            weight_kg: default_weight(),
            diabetes_type: default_diabetes_type(),
        }
    }
}

impl ProfileConfig {
    pub fn to_profile(&self) -> Result<Profile, ProfileError> {
        Profile::new(
            self.name.clone(),
            self.age,
            self.weight_kg,
            self.diabetes_type,
        )
    }
}

/// Log formats `main` can install
pub const LOG_FORMATS: &[&str] = &["pretty", "json"];

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from the standard locations, falling back to defaults plus
    /// environment overrides when no file exists.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("glucotrack").join("config.toml")),
            Some(PathBuf::from("./glucotrack.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first_existing(&config_paths)
    }

    /// Load the first path that exists. A file that exists but fails to
    /// load is an error, not a reason to fall back to defaults.
    pub fn load_first_existing(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::debug!("Using default config with environment overrides");
                Self::from_env()
            }
        }
    }

    /// Defaults plus environment variable overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Bands must be well-formed, the profile must pass form validation and
    /// the log format must be one `main` knows how to install.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.policies()?;
        self.profile.to_profile()?;
        if self.simulation.reading_min >= self.simulation.reading_max {
            return Err(ConfigError::Invalid(format!(
                "simulation.reading_min ({}) must be below reading_max ({})",
                self.simulation.reading_min, self.simulation.reading_max
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be one of {:?}, got {:?}",
                LOG_FORMATS, self.logging.format
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("GLUCOTRACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GLUCOTRACK_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(seed) = std::env::var("GLUCOTRACK_SEED") {
            match seed.parse() {
                Ok(s) => self.simulation.seed = Some(s),
                Err(e) => {
                    tracing::warn!("Ignoring GLUCOTRACK_SEED={:?}: {}", seed, e);
                }
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid threshold band: {0}")]
    Band(#[from] BandError),

    #[error("Invalid profile: {0}")]
    Profile(#[from] ProfileError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# GlucoTrack Configuration
#
# Environment variables override these settings:
# - GLUCOTRACK_LOG_LEVEL
# - GLUCOTRACK_LOG_FORMAT
# - GLUCOTRACK_SEED

# Normal range used by the data-insights alerts (mg/dL)
[thresholds.insights]
low = 80.0
high = 140.0

# Normal range used by the alert sidebar (mg/dL)
[thresholds.alert]
low = 70.0
high = 180.0

# Band for the sidebar's recommendation text (mg/dL)
[thresholds.advisory]
low = 70.0
high = 180.0

[simulation]
# Number of render cycles per simulation run
cycles = 1000

# Fixed RNG seed; omit for a time-based seed
# seed = 42

# Live readings are drawn uniformly from [reading_min, reading_max)
reading_min = 70
reading_max = 150

[profile]
name = "John Doe"
age = 30
weight_kg = 70
# type1, type2, gestational or other
diabetes_type = "type1"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}
