//! Widget state: the stopwatch plus the controls around it.

use tracing::{debug, info};

use task_timer_types::ui::{ActionLabel, InputMode, UiOptions};
use task_timer_types::{ElapsedMs, SecondsAdjustment};

use crate::clock::{Clock, SystemClock};
use crate::prompt::AddTimePrompt;
use crate::stopwatch::Stopwatch;

pub struct App<C: Clock = SystemClock> {
    stopwatch: Stopwatch<C>,
    add_time: AddTimePrompt,
    ui_options: UiOptions,
    /// Shown in the status line until the next successful action.
    notice: Option<String>,
    last_title: Option<String>,
    should_quit: bool,
}

impl App<SystemClock> {
    #[must_use]
    pub fn new(ui_options: UiOptions) -> Self {
        Self::with_clock(SystemClock, ui_options)
    }
}

impl<C: Clock> App<C> {
    pub fn with_clock(clock: C, ui_options: UiOptions) -> Self {
        Self {
            stopwatch: Stopwatch::with_clock(clock),
            add_time: AddTimePrompt::default(),
            ui_options,
            notice: None,
            last_title: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn stopwatch(&self) -> &Stopwatch<C> {
        &self.stopwatch
    }

    #[must_use]
    pub fn add_time(&self) -> &AddTimePrompt {
        &self.add_time
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.add_time.is_visible() {
            InputMode::AddTime
        } else {
            InputMode::Normal
        }
    }

    #[must_use]
    pub fn displayed(&self) -> ElapsedMs {
        self.stopwatch.displayed()
    }

    #[must_use]
    pub fn action_label(&self) -> ActionLabel {
        self.stopwatch.action_label()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Advance per-frame state.
    pub fn tick(&mut self) {
        self.stopwatch.tick();
    }

    pub fn toggle_active(&mut self) {
        self.notice = None;
        self.stopwatch.toggle();
    }

    pub fn reset(&mut self) {
        self.notice = None;
        self.stopwatch.reset();
    }

    pub fn open_add_time(&mut self) {
        self.notice = None;
        self.add_time.open();
    }

    pub fn cancel_add_time(&mut self) {
        self.add_time.cancel();
    }

    pub fn add_time_char(&mut self, c: char) {
        self.add_time.push_char(c);
    }

    pub fn add_time_text(&mut self, text: &str) {
        self.add_time.push_str(text);
    }

    pub fn add_time_backspace(&mut self) {
        self.add_time.backspace();
    }

    /// Applies the typed adjustment. Invalid input leaves the field open and
    /// records why in the notice line.
    pub fn submit_add_time(&mut self) -> Option<SecondsAdjustment> {
        match self.add_time.submit() {
            Ok(adjustment) => {
                self.stopwatch.adjust(adjustment);
                self.notice = None;
                info!(seconds = adjustment.seconds(), "Added time");
                Some(adjustment)
            }
            Err(err) => {
                debug!(%err, "Rejected add-time input");
                self.notice = Some(err.to_string());
                None
            }
        }
    }

    pub fn adjust(&mut self, adjustment: SecondsAdjustment) {
        self.stopwatch.adjust(adjustment);
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Compact window title, reported only when it differs from the last call.
    pub fn take_title_change(&mut self) -> Option<String> {
        let title = self.stopwatch.displayed().breakdown().title();
        if self.last_title.as_deref() == Some(title.as_str()) {
            return None;
        }
        self.last_title = Some(title.clone());
        Some(title)
    }
}
