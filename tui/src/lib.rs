//! TUI rendering for Task Timer using ratatui.

mod input;
mod theme;
mod ui_inline;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};
pub use ui_inline::{INLINE_VIEWPORT_HEIGHT, clear_inline_viewport, draw as draw_inline};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use task_timer_core::{ActionLabel, App, Clock, InputMode, TimeBreakdown};
use task_timer_types::pad;

const PANEL_WIDTH: u16 = 52;
/// Eight content rows plus the border.
const PANEL_HEIGHT: u16 = 10;

/// Main draw function
pub fn draw<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PANEL_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_timer_panel(frame, app, centered(chunks[1], PANEL_WIDTH), &palette, &glyphs);
    draw_status_bar(frame, app, chunks[3], &palette, &glyphs);
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn draw_timer_panel<C: Clock>(
    frame: &mut Frame,
    app: &App<C>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let [labels, values] = display_lines(app.displayed().breakdown(), palette);

    let mut lines = vec![
        Line::from(""),
        labels,
        values,
        Line::from(""),
        button_line(app.action_label(), palette),
        Line::from(""),
        add_time_line(app, palette, glyphs),
    ];
    if let Some(notice) = app.notice() {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(palette.error),
        )));
    }

    let title = format!(" {} Task Timer ", state_glyph(app, glyphs));
    let border_color = if app.stopwatch().is_running() {
        palette.success
    } else {
        palette.bg_border
    };
    let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(glyphs.border)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(palette.bg_panel))
            .title(Span::styled(title, Style::default().fg(palette.primary))),
    );
    frame.render_widget(panel, area);
}

pub(crate) fn state_glyph<C: Clock>(app: &App<C>, glyphs: &Glyphs) -> &'static str {
    match app.action_label() {
        ActionLabel::Pause => glyphs.running,
        ActionLabel::Resume => glyphs.paused,
        ActionLabel::Start => glyphs.idle,
    }
}

/// The unit label row (`hh mm ss SS`) and the value row (`00 : 00 : 00 : 00`),
/// with each label centered over its value.
pub(crate) fn display_lines(breakdown: TimeBreakdown, palette: &Palette) -> [Line<'static>; 2] {
    let mut labels = Vec::new();
    let mut values = Vec::new();

    for (i, (unit, value)) in breakdown.units().into_iter().enumerate() {
        if i > 0 {
            labels.push(Span::raw("   "));
            values.push(Span::styled(" : ", styles::unit_label(palette)));
        }
        let value = pad(value, 2);
        let width = value.len();
        labels.push(Span::styled(
            format!("{:^width$}", unit.label()),
            styles::unit_label(palette),
        ));
        values.push(Span::styled(value, styles::unit_value(palette)));
    }

    [Line::from(labels), Line::from(values)]
}

pub(crate) fn button_line(label: ActionLabel, palette: &Palette) -> Line<'static> {
    let action_style = match label {
        ActionLabel::Pause => styles::pause_button(palette),
        ActionLabel::Start | ActionLabel::Resume => styles::action_button(palette),
    };
    Line::from(vec![
        Span::styled(format!(" {label} "), action_style),
        Span::raw("  "),
        Span::styled(" Reset ", styles::reset_button(palette)),
    ])
}

pub(crate) fn add_time_line<C: Clock>(
    app: &App<C>,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Line<'static> {
    let prompt = app.add_time();
    if !prompt.is_visible() {
        return Line::from(Span::styled(
            " Add Time ",
            styles::secondary_button(palette),
        ));
    }

    let submit_style = if prompt.can_submit() {
        styles::action_button(palette)
    } else {
        styles::disabled_button(palette)
    };
    Line::from(vec![
        Span::styled("Seconds ", styles::unit_label(palette)),
        Span::styled(
            prompt.input().to_string(),
            Style::default().fg(palette.text_primary),
        ),
        Span::styled(glyphs.cursor, Style::default().fg(palette.accent)),
        Span::raw("  "),
        Span::styled(" Add Seconds ", submit_style),
        Span::raw(" "),
        Span::styled(" Cancel ", styles::secondary_button(palette)),
    ])
}

pub(crate) fn key_hints(mode: InputMode, palette: &Palette, glyphs: &Glyphs) -> Line<'static> {
    let hints: &[(&'static str, &'static str)] = match mode {
        InputMode::Normal => &[
            ("space", "start/pause"),
            ("r", "reset"),
            ("a", "add time"),
            ("q", "quit"),
        ],
        InputMode::AddTime => &[("enter", "add seconds"), ("esc", "cancel")],
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                format!(" {} ", glyphs.hint_separator),
                styles::key_hint(palette),
            ));
        }
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }
    Line::from(spans)
}

fn draw_status_bar<C: Clock>(
    frame: &mut Frame,
    app: &App<C>,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let status = Paragraph::new(key_hints(app.input_mode(), palette, glyphs));
    frame.render_widget(status, area);
}
