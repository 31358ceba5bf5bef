//! State of the add-time input field.

use task_timer_types::{AdjustmentError, SecondsAdjustment, is_valid_adjustment};

/// Pending add-time input and whether the field is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddTimePrompt {
    visible: bool,
    input: String,
}

impl AddTimePrompt {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Hides the field and discards whatever was typed.
    pub fn cancel(&mut self) {
        self.visible = false;
        self.input.clear();
    }

    pub fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn push_str(&mut self, text: &str) {
        for c in text.chars() {
            self.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Whether the submit action is enabled for the current input.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        is_valid_adjustment(&self.input)
    }

    /// Parses the input. On success the field is cleared and hidden; on
    /// failure it is left untouched so the user can correct it.
    pub fn submit(&mut self) -> Result<SecondsAdjustment, AdjustmentError> {
        let adjustment = SecondsAdjustment::parse(&self.input)?;
        self.cancel();
        Ok(adjustment)
    }
}
