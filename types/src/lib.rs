//! Core domain types for Task Timer.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies:
//! elapsed-time values, the `HH:MM:SS:CC` display breakdown, and parsing of
//! user-entered time adjustments.

mod adjustment;
mod duration;
pub mod ui;

pub use adjustment::{AdjustmentError, SecondsAdjustment, is_valid_adjustment};
pub use duration::{
    DISPLAY_RESOLUTION_MS, DisplayUnit, ElapsedMs, MILLIS_PER_HOUR, MILLIS_PER_MINUTE,
    MILLIS_PER_SECOND, TimeBreakdown, pad,
};
