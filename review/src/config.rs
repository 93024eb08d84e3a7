use anyhow::anyhow;
use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

/// Whether an overdue employee review is enacted or only displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Deadline is shown but never moves the request.
    Advisory,
    /// An overdue request is expired the next time someone tries to decide on it.
    #[default]
    OnAccess,
}

impl std::str::FromStr for ExpiryPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advisory" => Ok(ExpiryPolicy::Advisory),
            "on_access" => Ok(ExpiryPolicy::OnAccess),
            other => Err(anyhow!("Invalid EXPIRY_POLICY value: {}", other)),
        }
    }
}

/// Longest accepted review window; keeps deadline arithmetic in range.
pub const MAX_REVIEW_WINDOW_HOURS: i64 = 24 * 366;

/// Employee review windows per submission cadence, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewWindows {
    pub daily_hours: i64,
    pub periodic_hours: i64,
}

impl ReviewWindows {
    /// `None` when the configured hours do not fit in a `Duration`.
    pub fn daily(&self) -> Option<Duration> {
        Duration::try_hours(self.daily_hours)
    }

    /// Shared by weekly and monthly submissions.
    pub fn periodic(&self) -> Option<Duration> {
        Duration::try_hours(self.periodic_hours)
    }
}

impl Default for ReviewWindows {
    fn default() -> Self {
        Self {
            daily_hours: 24,
            periodic_hours: 48,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub time_zone: Tz,
    pub review_windows: ReviewWindows,
    pub expiry_policy: ExpiryPolicy,
    pub max_reason_length: usize,
    pub max_notes_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::UTC,
            review_windows: ReviewWindows::default(),
            expiry_policy: ExpiryPolicy::default(),
            max_reason_length: 500,
            max_notes_length: 1000,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unparsable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let time_zone_name = lookup("APP_TIMEZONE").unwrap_or_else(|| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let daily_hours = lookup("DAILY_REVIEW_WINDOW_HOURS")
            .and_then(|v| v.parse().ok())
            .filter(valid_window_hours)
            .unwrap_or(defaults.review_windows.daily_hours);

        let periodic_hours = lookup("PERIODIC_REVIEW_WINDOW_HOURS")
            .and_then(|v| v.parse().ok())
            .filter(valid_window_hours)
            .unwrap_or(defaults.review_windows.periodic_hours);

        let expiry_policy = match lookup("EXPIRY_POLICY") {
            Some(value) => value.parse()?,
            None => defaults.expiry_policy,
        };

        let max_reason_length = lookup("MAX_REASON_LENGTH")
            .and_then(|v| v.parse().ok())
            .filter(|len: &usize| *len > 0)
            .unwrap_or(defaults.max_reason_length);

        let max_notes_length = lookup("MAX_NOTES_LENGTH")
            .and_then(|v| v.parse().ok())
            .filter(|len: &usize| *len > 0)
            .unwrap_or(defaults.max_notes_length);

        Ok(Config {
            time_zone,
            review_windows: ReviewWindows {
                daily_hours,
                periodic_hours,
            },
            expiry_policy,
            max_reason_length,
            max_notes_length,
        })
    }
}

fn valid_window_hours(hours: &i64) -> bool {
    (1..=MAX_REVIEW_WINDOW_HOURS).contains(hours)
}
