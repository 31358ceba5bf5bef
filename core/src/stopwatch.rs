//! Stopwatch state machine.
//!
//! The displayed value is derived, never accumulated frame by frame:
//!
//! ```text
//! running: displayed = floor10(now - started_at) + offset
//! stopped: displayed = offset
//! ```
//!
//! Pausing folds the running value into `offset`, so pause/resume cycles
//! neither lose nor double-count time.

use std::time::Instant;

use tracing::debug;

use task_timer_types::ui::ActionLabel;
use task_timer_types::{ElapsedMs, SecondsAdjustment};

use crate::clock::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running { started_at: Instant },
}

#[derive(Debug, Clone)]
pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    state: RunState,
    /// Signed so that a negative adjustment made while running can still be
    /// outweighed by the time that keeps accruing.
    offset_ms: i64,
    displayed: ElapsedMs,
}

impl Stopwatch<SystemClock> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Stopwatch<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: RunState::Stopped,
            offset_ms: 0,
            displayed: ElapsedMs::ZERO,
        }
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running { .. })
    }

    /// Value shown as of the last [`tick`](Self::tick) or state change.
    #[must_use]
    pub fn displayed(&self) -> ElapsedMs {
        self.displayed
    }

    /// Accumulated offset in milliseconds (time carried over from earlier runs
    /// plus adjustments).
    #[must_use]
    pub fn offset_ms(&self) -> i64 {
        self.offset_ms
    }

    #[must_use]
    pub fn action_label(&self) -> ActionLabel {
        if self.is_running() {
            ActionLabel::Pause
        } else if self.displayed.is_zero() {
            ActionLabel::Start
        } else {
            ActionLabel::Resume
        }
    }

    /// Value as of right now, without touching the cached display.
    #[must_use]
    pub fn current(&self) -> ElapsedMs {
        match self.state {
            RunState::Stopped => ElapsedMs::ZERO.saturating_add_signed(self.offset_ms),
            RunState::Running { started_at } => {
                let elapsed =
                    ElapsedMs::from(self.clock.now().saturating_duration_since(started_at));
                elapsed.quantized().saturating_add_signed(self.offset_ms)
            }
        }
    }

    /// Refreshes the displayed value. Returns `true` when it changed.
    pub fn tick(&mut self) -> bool {
        let next = self.current();
        let changed = next != self.displayed;
        self.displayed = next;
        changed
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = RunState::Running {
            started_at: self.clock.now(),
        };
        self.displayed = self.current();
        debug!(offset_ms = self.offset_ms, "Stopwatch started");
    }

    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        let value = self.current();
        self.offset_ms = to_offset(value);
        self.state = RunState::Stopped;
        self.displayed = value;
        debug!(elapsed_ms = value.as_millis(), "Stopwatch paused");
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) -> RunState {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
        self.state
    }

    pub fn reset(&mut self) {
        self.state = RunState::Stopped;
        self.offset_ms = 0;
        self.displayed = ElapsedMs::ZERO;
        debug!("Stopwatch reset");
    }

    /// Merges a time adjustment. Applies to the display immediately when
    /// stopped; a running stopwatch picks it up on the next tick.
    pub fn adjust(&mut self, adjustment: SecondsAdjustment) {
        self.offset_ms = self.offset_ms.saturating_add(adjustment.as_millis());
        if !self.is_running() {
            // A stopped stopwatch has nothing left to absorb a negative offset.
            self.offset_ms = self.offset_ms.max(0);
            self.displayed = self.current();
        }
        debug!(
            seconds = adjustment.seconds(),
            offset_ms = self.offset_ms,
            "Stopwatch adjusted"
        );
    }
}

fn to_offset(value: ElapsedMs) -> i64 {
    i64::try_from(value.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{RunState, Stopwatch};
    use crate::clock::ManualClock;
    use task_timer_types::SecondsAdjustment;
    use task_timer_types::ui::ActionLabel;

    fn stopwatch() -> (Stopwatch<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Stopwatch::with_clock(clock.clone()), clock)
    }

    fn secs(seconds: i64) -> SecondsAdjustment {
        SecondsAdjustment::new(seconds).unwrap()
    }

    #[test]
    fn new_stopwatch_is_stopped_at_zero() {
        let (sw, _) = stopwatch();
        assert_eq!(sw.state(), RunState::Stopped);
        assert!(sw.displayed().is_zero());
        assert_eq!(sw.action_label(), ActionLabel::Start);
    }

    #[test]
    fn running_time_is_floored_to_ten_millis() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance_millis(1_237);
        assert!(sw.tick());
        assert_eq!(sw.displayed().as_millis(), 1_230);
        assert_eq!(sw.action_label(), ActionLabel::Pause);
    }

    #[test]
    fn tick_reports_unchanged_display() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance_millis(20);
        assert!(sw.tick());
        clock.advance_millis(5);
        assert!(!sw.tick());
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let (mut sw, clock) = stopwatch();
        sw.toggle();
        clock.advance_millis(2_500);
        assert!(matches!(sw.toggle(), RunState::Stopped));
        assert_eq!(sw.displayed().as_millis(), 2_500);
        assert_eq!(sw.action_label(), ActionLabel::Resume);

        clock.advance_millis(10_000);
        sw.tick();
        assert_eq!(sw.displayed().as_millis(), 2_500);

        sw.toggle();
        clock.advance_millis(1_000);
        sw.tick();
        assert_eq!(sw.displayed().as_millis(), 3_500);
    }

    #[test]
    fn repeated_pause_resume_does_not_drift() {
        let (mut sw, clock) = stopwatch();
        for _ in 0..5 {
            sw.start();
            clock.advance_millis(1_005);
            sw.pause();
        }
        // Each run is floored to 1000ms before being folded into the offset.
        assert_eq!(sw.displayed().as_millis(), 5_000);
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance_millis(500);
        sw.start();
        clock.advance_millis(500);
        sw.tick();
        assert_eq!(sw.displayed().as_millis(), 1_000);

        sw.pause();
        sw.pause();
        assert_eq!(sw.offset_ms(), 1_000);
    }

    #[test]
    fn reset_returns_to_start() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance_millis(4_000);
        sw.adjust(secs(30));
        sw.reset();
        assert_eq!(sw.state(), RunState::Stopped);
        assert!(sw.displayed().is_zero());
        assert_eq!(sw.offset_ms(), 0);
        assert_eq!(sw.action_label(), ActionLabel::Start);
        assert_eq!(sw.displayed().to_string(), "00:00:00:00");
    }

    #[test]
    fn adjust_while_stopped_updates_display_immediately() {
        let (mut sw, _) = stopwatch();
        sw.adjust(secs(90));
        assert_eq!(sw.displayed().as_millis(), 90_000);
        assert_eq!(sw.displayed().to_string(), "00:01:30:00");
        // Time was added but the stopwatch never ran.
        assert_eq!(sw.action_label(), ActionLabel::Resume);
    }

    #[test]
    fn adjust_while_running_applies_on_next_tick() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance_millis(1_000);
        sw.tick();
        sw.adjust(secs(60));
        assert_eq!(sw.displayed().as_millis(), 1_000);
        sw.tick();
        assert_eq!(sw.displayed().as_millis(), 61_000);
    }

    #[test]
    fn negative_adjustment_clamps_at_zero_when_stopped() {
        let (mut sw, _) = stopwatch();
        sw.adjust(secs(10));
        sw.adjust(secs(-25));
        assert!(sw.displayed().is_zero());
        assert_eq!(sw.offset_ms(), 0);
        assert_eq!(sw.action_label(), ActionLabel::Start);
    }

    #[test]
    fn negative_adjustment_while_running_is_absorbed_by_elapsed_time() {
        let (mut sw, clock) = stopwatch();
        sw.start();
        clock.advance_millis(3_000);
        sw.adjust(secs(-5));
        sw.tick();
        assert!(sw.displayed().is_zero());

        clock.advance_millis(4_000);
        sw.tick();
        assert_eq!(sw.displayed().as_millis(), 2_000);

        sw.pause();
        assert_eq!(sw.offset_ms(), 2_000);
    }
}
