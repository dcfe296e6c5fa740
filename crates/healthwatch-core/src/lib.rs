use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod app_config;
pub mod config;
mod summary;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use summary::{
    summarize_metrics, PeriodSummary, BASELINE_HR, BASELINE_SLEEP_PER_SAMPLE, BASELINE_STEPS_DAILY,
};

/// Which of the two seeded monitoring states the patient is currently in.
///
/// The demo dataset carries one vitals row and one trend series per state;
/// a device sync flips between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    Stable,
    Risk,
}

impl MonitorState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MonitorState::Stable => "stable",
            MonitorState::Risk => "risk",
        }
    }

    /// The state a device sync transitions into.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            MonitorState::Stable => MonitorState::Risk,
            MonitorState::Risk => MonitorState::Stable,
        }
    }

    #[must_use]
    pub fn is_risk(self) -> bool {
        matches!(self, MonitorState::Risk)
    }

    /// Dashboard theme color for the state (HSL, as the SPA consumes it).
    #[must_use]
    pub fn theme_color(self) -> &'static str {
        match self {
            MonitorState::Stable => "hsl(178 100% 25%)",
            MonitorState::Risk => "hsl(43 96% 56%)",
        }
    }
}

impl std::str::FromStr for MonitorState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stable" => Ok(MonitorState::Stable),
            "risk" => Ok(MonitorState::Risk),
            other => Err(CoreError::InvalidState(other.to_owned())),
        }
    }
}

impl std::fmt::Display for MonitorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporting window for health metrics and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Expected step count for the whole period at the daily baseline rate.
    #[must_use]
    pub fn baseline_steps(self) -> i64 {
        match self {
            Period::Day => BASELINE_STEPS_DAILY,
            Period::Week => BASELINE_STEPS_DAILY * 7,
            Period::Month => BASELINE_STEPS_DAILY * 30,
            Period::Year => BASELINE_STEPS_DAILY * 365,
        }
    }
}

impl std::str::FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(CoreError::InvalidPeriod(other.to_owned())),
        }
    }
}

/// The monitored patient's profile, device pairing and caregiver contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub address: String,
    pub device_name: String,
    pub device_status: String,
    pub device_battery: String,
    pub caregiver_name: String,
    pub caregiver_relationship: String,
    pub caregiver_phone: String,
    pub caregiver_email: String,
    pub current_state: MonitorState,
}

impl Patient {
    /// First name, used when addressing the caregiver about the patient.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// One seeded vitals snapshot for a monitoring state.
///
/// `stability_score` is computed upstream and opaque here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsRecord {
    pub state: MonitorState,
    pub hr: i64,
    pub sleep_hours: f64,
    pub steps: i64,
    pub fatigue: String,
    pub stability_score: i64,
    pub status: String,
    pub bp_sys: i64,
    pub bp_dia: i64,
    pub resting_hr: i64,
    pub activity_min: i64,
    pub last_updated: Option<String>,
}

impl VitalsRecord {
    /// A stability score under 70 is treated as a risk signal.
    #[must_use]
    pub fn is_at_risk(&self) -> bool {
        self.stability_score < 70
    }
}

/// One point of the stability-score trend chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub name: String,
    pub score: i64,
}

/// One labelled sample of period health metrics (an hour, day, week or
/// month bucket depending on the period).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSample {
    pub label: String,
    pub hr: i64,
    pub resting_hr: i64,
    pub bp_sys: i64,
    pub bp_dia: i64,
    pub steps: i64,
    pub sleep: f64,
    pub activity_min: i64,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid monitor state: {0}")]
    InvalidState(String),
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
    #[error("cannot summarize an empty metric set")]
    EmptySummaryInput,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
