//! Elapsed-time values and their display breakdown.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MILLIS_PER_SECOND: u64 = 1000;
pub const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Display resolution. Running time is floored to this step before display.
pub const DISPLAY_RESOLUTION_MS: u64 = 10;

/// Milliseconds shown on the stopwatch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ElapsedMs(u64);

impl ElapsedMs {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Floors to the display resolution (10 ms).
    #[must_use]
    pub const fn quantized(self) -> Self {
        Self(self.0 - self.0 % DISPLAY_RESOLUTION_MS)
    }

    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Merges a signed adjustment, clamping at zero.
    #[must_use]
    pub const fn saturating_add_signed(self, delta_ms: i64) -> Self {
        Self(self.0.saturating_add_signed(delta_ms))
    }

    #[must_use]
    pub const fn breakdown(self) -> TimeBreakdown {
        TimeBreakdown::from_millis(self.0)
    }
}

impl From<std::time::Duration> for ElapsedMs {
    fn from(duration: std::time::Duration) -> Self {
        Self(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for ElapsedMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.breakdown().fmt(f)
    }
}

/// One labelled cell of the stopwatch display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    Hours,
    Minutes,
    Seconds,
    Centis,
}

impl DisplayUnit {
    pub const ALL: [DisplayUnit; 4] = [
        DisplayUnit::Hours,
        DisplayUnit::Minutes,
        DisplayUnit::Seconds,
        DisplayUnit::Centis,
    ];

    /// Short label rendered above the value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DisplayUnit::Hours => "hh",
            DisplayUnit::Minutes => "mm",
            DisplayUnit::Seconds => "ss",
            DisplayUnit::Centis => "SS",
        }
    }
}

/// A duration split into the stopwatch's display fields.
///
/// `Display` renders the full `HH:MM:SS:CC` form. Hours are never truncated,
/// so 100 hours renders as `100:00:00:00`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub centis: u64,
}

impl TimeBreakdown {
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            hours: millis / MILLIS_PER_HOUR,
            minutes: millis % MILLIS_PER_HOUR / MILLIS_PER_MINUTE,
            seconds: millis % MILLIS_PER_MINUTE / MILLIS_PER_SECOND,
            centis: millis % MILLIS_PER_SECOND / DISPLAY_RESOLUTION_MS,
        }
    }

    #[must_use]
    pub const fn value(&self, unit: DisplayUnit) -> u64 {
        match unit {
            DisplayUnit::Hours => self.hours,
            DisplayUnit::Minutes => self.minutes,
            DisplayUnit::Seconds => self.seconds,
            DisplayUnit::Centis => self.centis,
        }
    }

    /// The four display cells in order, each with its label.
    #[must_use]
    pub fn units(&self) -> [(DisplayUnit, u64); 4] {
        DisplayUnit::ALL.map(|unit| (unit, self.value(unit)))
    }

    /// Compact form for window titles: `MM:SS`, or `HH:MM:SS` once an hour has passed.
    #[must_use]
    pub fn title(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if self.hours > 0 {
            parts.push(pad(self.hours, 2));
        }
        parts.push(pad(self.minutes, 2));
        parts.push(pad(self.seconds, 2));
        parts.join(":")
    }
}

impl fmt::Display for TimeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            pad(self.hours, 2),
            pad(self.minutes, 2),
            pad(self.seconds, 2),
            pad(self.centis, 2)
        )
    }
}

/// Zero-pads `value` to at least `min_digits` digits.
#[must_use]
pub fn pad(value: u64, min_digits: usize) -> String {
    format!("{value:0>min_digits$}")
}
