//! Price history state containers: app-owned, SDK-provided update logic.

use super::Observation;
use crate::shared::fmt::decimal;
use crate::shared::fmt::time;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// Rows shown by the reference dashboard.
pub const DEFAULT_HISTORY_CAPACITY: usize = 15;

/// Direction of a row's last price relative to the next-older row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Trend {
    Up,
    Down,
    #[default]
    Flat,
}

impl Trend {
    /// Classify `now` against the next-older price. No older price is `Flat`.
    pub fn between(now: &Decimal, older: Option<&Decimal>) -> Self {
        match older {
            Some(older) if now > older => Trend::Up,
            Some(older) if now < older => Trend::Down,
            _ => Trend::Flat,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Flat => "flat",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One formatted history row, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub time: String,
    pub last: String,
    pub avg: String,
    pub vwap: String,
    pub trend: Trend,
}

/// Capped, newest-first history of observations for one target.
///
/// The app owns instances of this type. Pushing prepends and drops whatever
/// falls beyond the capacity; the buffer is cleared or replaced wholesale,
/// never merged.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    observations: VecDeque<Observation>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    /// A capacity of zero is raised to one so the head is always the latest push.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            observations: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an observation, evicting the oldest beyond capacity.
    pub fn push(&mut self, observation: Observation) {
        self.observations.push_front(observation);
        self.observations.truncate(self.capacity);
    }

    /// By-value form of [`push`](Self::push).
    pub fn pushed(mut self, observation: Observation) -> Self {
        self.push(observation);
        self
    }

    /// Replace all observations (newest first), keeping at most `capacity`.
    pub fn replace(&mut self, observations: impl IntoIterator<Item = Observation>) {
        self.observations.clear();
        self.observations
            .extend(observations.into_iter().take(self.capacity));
    }

    pub fn clear(&mut self) {
        self.observations.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.observations.front()
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// Trend of row `index` against row `index + 1`. Out of range is `Flat`.
    pub fn trend(&self, index: usize) -> Trend {
        match self.observations.get(index) {
            Some(row) => Trend::between(
                &row.price_now,
                self.observations.get(index + 1).map(|o| &o.price_now),
            ),
            None => Trend::Flat,
        }
    }

    /// Empty rows needed to pad the display to `capacity`.
    pub fn placeholders(&self) -> usize {
        self.capacity - self.observations.len()
    }

    /// Format every row for display.
    pub fn rows(&self) -> Vec<PriceRow> {
        self.observations
            .iter()
            .enumerate()
            .map(|(i, o)| PriceRow {
                time: time::format_timestamp(o.timestamp_millis),
                last: decimal::fixed(&o.price_now),
                avg: decimal::fixed(&o.price_avg),
                vwap: decimal::fixed(&o.price_vwap),
                trend: self.trend(i),
            })
            .collect()
    }
}
