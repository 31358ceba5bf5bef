//! Parsing of user-entered time adjustments.
//!
//! Input is read with integer-prefix semantics: leading whitespace and an
//! optional sign, then a run of ASCII digits. Anything after the digits is
//! ignored, so `"90s"` adds ninety seconds.

use std::str::FromStr;

use thiserror::Error;

use crate::duration::MILLIS_PER_SECOND;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjustmentError {
    #[error("no time entered")]
    Empty,
    #[error("{input:?} is not a number of seconds")]
    NotANumber { input: String },
    #[error("{input:?} is too large")]
    OutOfRange { input: String },
}

/// Whole seconds to add to (or, when negative, remove from) the stopwatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecondsAdjustment(i64);

impl SecondsAdjustment {
    /// Largest magnitude whose millisecond value still fits in an `i64`.
    pub const MAX_SECONDS: i64 = i64::MAX / MILLIS_PER_SECOND as i64;

    pub fn new(seconds: i64) -> Result<Self, AdjustmentError> {
        if seconds.unsigned_abs() > Self::MAX_SECONDS.unsigned_abs() {
            return Err(AdjustmentError::OutOfRange {
                input: seconds.to_string(),
            });
        }
        Ok(Self(seconds))
    }

    pub fn parse(input: &str) -> Result<Self, AdjustmentError> {
        let trimmed = input.trim_start();
        if trimmed.is_empty() {
            return Err(AdjustmentError::Empty);
        }

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digits_len = unsigned
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits_len == 0 {
            return Err(AdjustmentError::NotANumber {
                input: input.to_string(),
            });
        }

        let out_of_range = || AdjustmentError::OutOfRange {
            input: input.to_string(),
        };
        let magnitude: i64 = unsigned[..digits_len].parse().map_err(|_| out_of_range())?;
        if magnitude > Self::MAX_SECONDS {
            return Err(out_of_range());
        }

        Ok(Self(if negative { -magnitude } else { magnitude }))
    }

    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0 * MILLIS_PER_SECOND as i64
    }
}

impl FromStr for SecondsAdjustment {
    type Err = AdjustmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Whether `input` would be accepted by [`SecondsAdjustment::parse`].
#[must_use]
pub fn is_valid_adjustment(input: &str) -> bool {
    SecondsAdjustment::parse(input).is_ok()
}
