// Constants — threshold literals and sampling ranges used by the dashboard.

use crate::types::GlucoseLevel;

// Insights view band (mg/dL)
pub const INSIGHTS_LOW: GlucoseLevel = 80.0;
pub const INSIGHTS_HIGH: GlucoseLevel = 140.0;

// Alert sidebar band (mg/dL), also the default recommendation band
pub const ALERT_LOW: GlucoseLevel = 70.0;
pub const ALERT_HIGH: GlucoseLevel = 180.0;

// Upper target drawn on the trend chart; never used for classification
pub const CHART_UPPER_TARGET: GlucoseLevel = 130.0;

// Half-open integer ranges the random source draws from
pub const LIVE_READING_RANGE: (i64, i64) = (70, 150);
pub const TREND_READING_RANGE: (i64, i64) = (70, 180);

// Trend window
pub const TREND_START_YMD: (i32, u32, u32) = (2024, 12, 1);
pub const TREND_DAYS: usize = 30;

// Insights view messages
pub const INSIGHTS_HIGH_MESSAGE: &str = "High Glucose Alert: Immediate action required!";
pub const INSIGHTS_LOW_MESSAGE: &str =
    "Low Glucose Alert: Consider eating or adjusting medication.";
pub const INSIGHTS_NORMAL_MESSAGE: &str = "Glucose levels are within the normal range.";

// Alert sidebar messages
pub const ALERT_HIGH_MESSAGE: &str = "High glucose alert";
pub const ALERT_LOW_MESSAGE: &str = "Low glucose alert";
pub const ALERT_NORMAL_MESSAGE: &str = "Current glucose level is normal";

// Recommendation step
pub const RECOMMEND_HIGH: &str =
    "Consider a correction dose or contact your care team if levels stay high.";
pub const RECOMMEND_LOW: &str =
    "Take 15 g of fast-acting carbohydrate and recheck in 15 minutes.";
pub const RECOMMEND_NORMAL: &str = "Keep following your current plan.";

// Device defaults
pub const DEFAULT_BATTERY_PERCENT: u8 = 80;
pub const DEFAULT_MINUTES_SINCE_SYNC: u32 = 5;

// Profile bounds
pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 100;
pub const MIN_WEIGHT_KG: u16 = 40;
pub const MAX_WEIGHT_KG: u16 = 150;

pub const FOOTER: &str = "© 2024 GlucoTrack Innovations | Privacy Policy | Terms of Service";
