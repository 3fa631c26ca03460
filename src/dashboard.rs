//! Dashboard pages
//!
//! Every refresh is a call to [`render`] with an explicit [`DashboardState`]
//! and the reading sources to draw from. Nothing is kept between calls.

use chrono::{Days, NaiveDate};
use serde::Deserialize;

use crate::constants::*;
use crate::error::{DashboardError, ProfileError};
use crate::logic::{checked_classify, recommend, tone_for};
use crate::simulator::SeverityTally;
use crate::source::{take_readings, ReadingSource};
use crate::types::*;

/// Navigation targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    DeviceSettings,
    DataInsights,
    Reports,
    Settings,
    Profile,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::DeviceSettings,
        Page::DataInsights,
        Page::Reports,
        Page::Settings,
        Page::Profile,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Device Status",
            Page::DeviceSettings => "Device Settings",
            Page::DataInsights => "Glucose Monitoring",
            Page::Reports => "Data Insights",
            Page::Settings => "Settings",
            Page::Profile => "Profile",
        }
    }
}

impl std::str::FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "home" => Ok(Page::Home),
            "device-settings" => Ok(Page::DeviceSettings),
            "data-insights" | "insights" => Ok(Page::DataInsights),
            "reports" => Ok(Page::Reports),
            "settings" => Ok(Page::Settings),
            "profile" => Ok(Page::Profile),
            other => Err(format!("unknown page '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceStatus {
    pub healthy: bool,
    pub battery_percent: u8,
    pub minutes_since_sync: u32,
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self {
            healthy: true,
            battery_percent: DEFAULT_BATTERY_PERCENT,
            minutes_since_sync: DEFAULT_MINUTES_SINCE_SYNC,
        }
    }
}

impl DeviceStatus {
    pub fn health_message(&self) -> &'static str {
        if self.healthy {
            "Device is functioning properly."
        } else {
            "Device needs attention."
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub real_time_monitoring: bool,
    pub notifications: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiabetesType {
    Type1,
    Type2,
    Gestational,
    Other,
}

impl std::fmt::Display for DiabetesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiabetesType::Type1 => write!(f, "Type 1"),
            DiabetesType::Type2 => write!(f, "Type 2"),
            DiabetesType::Gestational => write!(f, "Gestational"),
            DiabetesType::Other => write!(f, "Other"),
        }
    }
}

/// Profile form contents. Fields are private; [`Profile::new`] enforces the
/// form's age and weight bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    age: u8,
    weight_kg: u16,
    diabetes_type: DiabetesType,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        age: u8,
        weight_kg: u16,
        diabetes_type: DiabetesType,
    ) -> Result<Self, ProfileError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ProfileError::AgeOutOfRange {
                age,
                min: MIN_AGE,
                max: MAX_AGE,
            });
        }
        if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight_kg) {
            return Err(ProfileError::WeightOutOfRange {
                weight: weight_kg,
                min: MIN_WEIGHT_KG,
                max: MAX_WEIGHT_KG,
            });
        }
        Ok(Self {
            name,
            age,
            weight_kg,
            diabetes_type,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn weight_kg(&self) -> u16 {
        self.weight_kg
    }

    pub fn diabetes_type(&self) -> DiabetesType {
        self.diabetes_type
    }

    pub fn summary(&self) -> String {
        format!(
            "Profile updated for: {}, Age: {}, Weight: {} kg, Diabetes: {}",
            self.name, self.age, self.weight_kg, self.diabetes_type
        )
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            age: 30,
            weight_kg: 70,
            diabetes_type: DiabetesType::Type1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSettings {
    pub start: NaiveDate,
    pub days: usize,
}

impl Default for TrendSettings {
    fn default() -> Self {
        let (y, m, d) = TREND_START_YMD;
        Self {
            start: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
            days: TREND_DAYS,
        }
    }
}

/// Everything a render needs besides the reading sources.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub page: Page,
    pub device: DeviceStatus,
    pub preferences: Preferences,
    pub profile: Profile,
    pub policies: PolicySet,
    pub trend: TrendSettings,
}

impl DashboardState {
    pub fn on_page(page: Page) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: GlucoseLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub average: GlucoseLevel,
    pub lowest: GlucoseLevel,
    pub highest: GlucoseLevel,
}

impl Statistics {
    pub fn from_values(values: &[GlucoseLevel]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let average = values.iter().sum::<f64>() / values.len() as f64;
        let lowest = values.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            average,
            lowest,
            highest,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeView {
    pub device: DeviceStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsView {
    pub current: Classification,
    pub sidebar: Classification,
    pub trend: Vec<TrendPoint>,
    pub upper_target: GlucoseLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportsView {
    pub statistics: Statistics,
    pub distribution: SeverityTally,
    pub recommendation: &'static str,
    pub advisory: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub preferences: Preferences,
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home(HomeView),
    Insights(InsightsView),
    Reports(ReportsView),
    Settings(SettingsView),
    /// Pages with navigation entries but no content yet.
    Placeholder(Page),
}

fn build_trend(
    settings: &TrendSettings,
    source: &mut dyn ReadingSource,
) -> Result<Vec<TrendPoint>, DashboardError> {
    let values = take_readings(source, settings.days)?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let date = settings
                .start
                .checked_add_days(Days::new(i as u64))
                .ok_or(DashboardError::DateOutOfRange {
                    start: settings.start,
                    offset: i,
                })?;
            Ok(TrendPoint { date, value })
        })
        .collect()
}

/// Advice derived from how often a trend left the insights band.
pub fn trend_recommendation(distribution: &SeverityTally) -> &'static str {
    if distribution.percent(Severity::High) >= 25.0 {
        "Your glucose trend shows frequent high levels. Consider adjusting your diet or medication."
    } else if distribution.percent(Severity::Low) >= 10.0 {
        "Your glucose trend shows frequent low levels. Keep fast-acting carbohydrates at hand."
    } else {
        "Your glucose trend is mostly within range. Keep following your current plan."
    }
}

fn render_insights(
    state: &DashboardState,
    live: &mut dyn ReadingSource,
    trend: &mut dyn ReadingSource,
) -> Result<InsightsView, DashboardError> {
    let reading = live.next_reading()?;
    let current = checked_classify(reading, &state.policies.insights)?;
    let sidebar = checked_classify(reading, &state.policies.alert)?;
    tracing::debug!(reading, severity = %current.severity, "insights reading");

    Ok(InsightsView {
        current,
        sidebar,
        trend: build_trend(&state.trend, trend)?,
        upper_target: CHART_UPPER_TARGET,
    })
}

fn render_reports(
    state: &DashboardState,
    trend: &mut dyn ReadingSource,
) -> Result<ReportsView, DashboardError> {
    let points = build_trend(&state.trend, trend)?;
    let values: Vec<GlucoseLevel> = points.iter().map(|p| p.value).collect();
    let statistics = Statistics::from_values(&values).ok_or(DashboardError::EmptyTrend)?;

    let mut distribution = SeverityTally::default();
    for &value in &values {
        distribution.record(checked_classify(value, &state.policies.insights)?.severity);
    }

    let advisory_band = state
        .policies
        .alert
        .advisory_band
        .unwrap_or(state.policies.alert.band);

    Ok(ReportsView {
        statistics,
        recommendation: trend_recommendation(&distribution),
        advisory: recommend(statistics.average, &advisory_band),
        distribution,
    })
}

/// Render the page selected in `state`.
///
/// `live` supplies the current reading, `trend` the daily trend values.
/// Pages that need no readings leave both sources untouched.
pub fn render(
    state: &DashboardState,
    live: &mut dyn ReadingSource,
    trend: &mut dyn ReadingSource,
) -> Result<View, DashboardError> {
    tracing::debug!(page = ?state.page, "rendering page");
    let view = match state.page {
        Page::Home => View::Home(HomeView {
            device: state.device,
        }),
        Page::DataInsights => View::Insights(render_insights(state, live, trend)?),
        Page::Reports => View::Reports(render_reports(state, trend)?),
        Page::Settings => View::Settings(SettingsView {
            preferences: state.preferences,
            profile: state.profile.clone(),
        }),
        Page::DeviceSettings | Page::Profile => View::Placeholder(state.page),
    };
    Ok(view)
}

impl View {
    pub fn page(&self) -> Page {
        match self {
            View::Home(_) => Page::Home,
            View::Insights(_) => Page::DataInsights,
            View::Reports(_) => Page::Reports,
            View::Settings(_) => Page::Settings,
            View::Placeholder(page) => *page,
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

impl std::fmt::Display for HomeView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Monitor your device's real-time performance and data.")?;
        writeln!(f)?;
        let tone = if self.device.healthy {
            Tone::Success
        } else {
            Tone::Error
        };
        writeln!(f, "Device Health:  {} {}", tone, self.device.health_message())?;
        writeln!(f, "Battery Status: {}%", self.device.battery_percent)?;
        writeln!(
            f,
            "Last Sync:      Last Synced: {} minutes ago",
            self.device.minutes_since_sync
        )
    }
}

impl std::fmt::Display for InsightsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Real-Time Glucose Levels")?;
        writeln!(f, "  Current Blood Glucose: {} mg/dL", self.current.reading)?;
        writeln!(f)?;
        writeln!(
            f,
            "Glucose Trends (upper target {} mg/dL)",
            self.upper_target
        )?;
        for point in &self.trend {
            let marker = if point.value > self.upper_target { " ^" } else { "" };
            writeln!(f, "  {}  {:>5} mg/dL{}", point.date, point.value, marker)?;
        }
        writeln!(f)?;
        writeln!(f, "Alerts")?;
        writeln!(
            f,
            "  {} {}",
            tone_for(self.current.severity),
            self.current.message
        )?;
        writeln!(
            f,
            "  Sidebar: {} {}",
            tone_for(self.sidebar.severity),
            self.sidebar.message
        )?;
        if let Some(rec) = self.sidebar.recommendation {
            writeln!(f, "  Recommendation: {}", rec)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for ReportsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Statistics and Recommendations")?;
        writeln!(
            f,
            "  Average Glucose Level: {:.0} mg/dL",
            self.statistics.average
        )?;
        writeln!(f, "  Lowest Level: {} mg/dL", self.statistics.lowest)?;
        writeln!(f, "  Highest Level: {} mg/dL", self.statistics.highest)?;
        writeln!(f)?;
        writeln!(f, "Glucose Distribution")?;
        for severity in Severity::ALL {
            writeln!(
                f,
                "  {:<7} {:>5.1}%",
                severity,
                self.distribution.percent(severity)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Personalized Recommendations")?;
        writeln!(f, "  {}", self.recommendation)?;
        writeln!(f, "  {}", self.advisory)
    }
}

impl std::fmt::Display for SettingsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Device Preferences")?;
        writeln!(
            f,
            "  {} Enable Real-Time Monitoring",
            checkbox(self.preferences.real_time_monitoring)
        )?;
        writeln!(
            f,
            "  {} Enable Notifications for High/Low Glucose",
            checkbox(self.preferences.notifications)
        )?;
        writeln!(f)?;
        writeln!(f, "Profile Settings")?;
        writeln!(f, "  {}", self.profile.summary())
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "GlucoTrack Innovations :: {}", self.page().title())?;
        writeln!(f)?;
        match self {
            View::Home(v) => write!(f, "{}", v)?,
            View::Insights(v) => write!(f, "{}", v)?,
            View::Reports(v) => write!(f, "{}", v)?,
            View::Settings(v) => write!(f, "{}", v)?,
            View::Placeholder(_) => writeln!(f, "Nothing to show here yet.")?,
        }
        writeln!(f)?;
        write!(f, "{}", FOOTER)
    }
}
