//! UI state types shared by the core and the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.

use std::fmt;

/// Which control currently receives key input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// The add-time field is open and receives typed text.
    AddTime,
}

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

/// Label of the primary start/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLabel {
    Start,
    Pause,
    Resume,
}

impl ActionLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionLabel::Start => "Start",
            ActionLabel::Pause => "Pause",
            ActionLabel::Resume => "Resume",
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
