//! Polling session parameters: target, refresh frequency, enabled flag.

use crate::shared::AlphaId;
use std::time::Duration;

/// Refresh frequency in whole seconds, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Frequency(u32);

impl Frequency {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 60;

    /// Out-of-range values are clamped, never rejected.
    pub fn clamped(seconds: i64) -> Self {
        Self(seconds.clamp(Self::MIN as i64, Self::MAX as i64) as u32)
    }

    /// Parse user input; anything that is not a number becomes the minimum.
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && n != 0.0 => Self::clamped(n.trunc() as i64),
            _ => Self(Self::MIN),
        }
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self(5)
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Token identifying which session configuration a fetch was issued under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The `(target, frequency, enabled)` tuple driving the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub target: AlphaId,
    pub frequency: Frequency,
    pub enabled: bool,
}

impl Session {
    pub fn new(target: impl Into<AlphaId>, frequency: Frequency, enabled: bool) -> Self {
        Self {
            target: target.into(),
            frequency,
            enabled,
        }
    }

    /// A session runs a timer only while enabled with a non-empty target.
    pub fn is_live(&self) -> bool {
        self.enabled && !self.target.is_empty()
    }
}
