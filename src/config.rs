//! Dashboard configuration.

use crate::domain::price::DEFAULT_HISTORY_CAPACITY;
use crate::network::{API_URL_ENV, DEFAULT_API_URL};
use crate::poll::Frequency;

/// Environment variable overriding the number of history rows.
pub const HISTORY_ROWS_ENV: &str = "ALPHA_HISTORY_ROWS";

/// Environment variable overriding the refresh frequency, in seconds.
pub const REFRESH_SECS_ENV: &str = "ALPHA_REFRESH_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_url: String,
    pub history_capacity: usize,
    pub frequency: Frequency,
    /// Poll automatically once a target is selected.
    pub polling: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            frequency: Frequency::default(),
            polling: false,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Unparseable values keep the default;
    /// the frequency is clamped into range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV).map(|v| v.trim().to_string()) {
            if !url.is_empty() {
                config.api_url = url;
            }
        }
        if let Some(raw) = lookup(HISTORY_ROWS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(rows) if rows > 0 => config.history_capacity = rows,
                _ => tracing::warn!(key = HISTORY_ROWS_ENV, value = %raw, "Ignoring invalid value"),
            }
        }
        if let Some(raw) = lookup(REFRESH_SECS_ENV) {
            match raw.trim().parse::<i64>() {
                Ok(secs) => config.frequency = Frequency::clamped(secs),
                Err(_) => tracing::warn!(key = REFRESH_SECS_ENV, value = %raw, "Ignoring invalid value"),
            }
        }
        config
    }

    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    pub fn history_capacity(mut self, rows: usize) -> Self {
        self.history_capacity = rows;
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn polling(mut self, enabled: bool) -> Self {
        self.polling = enabled;
        self
    }
}
