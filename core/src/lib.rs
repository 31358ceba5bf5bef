//! Core domain logic for Task Timer.
//!
//! This crate owns the stopwatch state machine, the clock it reads, the
//! add-time prompt, and the [`App`] that ties them together for the UI.

mod app;
pub mod clock;
mod prompt;
mod stopwatch;

pub use app::App;
pub use clock::{Clock, ManualClock, SystemClock};
pub use prompt::AddTimePrompt;
pub use stopwatch::{RunState, Stopwatch};

pub use task_timer_types::ui::{ActionLabel, InputMode, UiOptions};
pub use task_timer_types::{AdjustmentError, ElapsedMs, SecondsAdjustment, TimeBreakdown};
