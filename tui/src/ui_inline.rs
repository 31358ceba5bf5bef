//! Inline TUI mode - a few rows at the bottom of the shell.

use ratatui::prelude::{Backend, Terminal};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use task_timer_core::{App, Clock};

use crate::theme::{glyphs, palette};
use crate::{add_time_line, button_line, key_hints, state_glyph};

pub const INLINE_VIEWPORT_HEIGHT: u16 = 3;

pub fn draw<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let mut timer = vec![
        Span::raw(" "),
        Span::styled(state_glyph(app, &glyphs), Style::default().fg(palette.accent)),
        Span::raw(" "),
        Span::styled(
            app.displayed().to_string(),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];
    timer.extend(button_line(app.action_label(), &palette).spans);
    frame.render_widget(Paragraph::new(Line::from(timer)), chunks[0]);

    let second_row = match app.notice() {
        Some(notice) if !app.add_time().is_visible() => Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(palette.error),
        )),
        _ => {
            let mut spans = vec![Span::raw(" ")];
            spans.extend(add_time_line(app, &palette, &glyphs).spans);
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(second_row), chunks[1]);

    frame.render_widget(
        Paragraph::new(key_hints(app.input_mode(), &palette, &glyphs)),
        chunks[2],
    );
}

/// Blank the inline viewport so the shell prompt resumes on clean rows.
pub fn clear_inline_viewport<B>(terminal: &mut Terminal<B>) -> Result<(), B::Error>
where
    B: Backend,
{
    terminal.draw(|frame| frame.render_widget(Clear, frame.area()))?;
    Ok(())
}
