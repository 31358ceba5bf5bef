//! End-to-end stopwatch behavior through the widget state.

use task_timer_core::{ActionLabel, InputMode};

use crate::common::manual_app;

#[test]
fn full_session_start_pause_adjust_resume_reset() {
    let (mut app, clock) = manual_app();
    assert_eq!(app.displayed().to_string(), "00:00:00:00");
    assert_eq!(app.action_label(), ActionLabel::Start);

    app.toggle_active();
    clock.advance_millis(61_234);
    app.tick();
    assert_eq!(app.displayed().to_string(), "00:01:01:23");

    app.toggle_active();
    assert_eq!(app.action_label(), ActionLabel::Resume);

    app.open_add_time();
    app.add_time_text("3600");
    assert!(app.submit_add_time().is_some());
    assert_eq!(app.displayed().to_string(), "01:01:01:23");

    app.toggle_active();
    clock.advance_millis(500);
    app.tick();
    assert_eq!(app.displayed().to_string(), "01:01:01:73");

    app.reset();
    assert_eq!(app.displayed().to_string(), "00:00:00:00");
    assert_eq!(app.action_label(), ActionLabel::Start);
}

#[test]
fn time_does_not_advance_while_paused() {
    let (mut app, clock) = manual_app();
    app.toggle_active();
    clock.advance_millis(2_000);
    app.toggle_active();

    for _ in 0..10 {
        clock.advance_millis(1_000);
        app.tick();
    }
    assert_eq!(app.displayed().as_millis(), 2_000);
}

#[test]
fn adding_time_while_running_keeps_counting() {
    let (mut app, clock) = manual_app();
    app.toggle_active();
    clock.advance_millis(1_000);

    app.open_add_time();
    app.add_time_text("10");
    app.submit_add_time();
    assert_eq!(app.input_mode(), InputMode::Normal);

    clock.advance_millis(1_000);
    app.tick();
    assert_eq!(app.displayed().as_millis(), 12_000);
    assert_eq!(app.action_label(), ActionLabel::Pause);
}

#[test]
fn trailing_text_in_adjustment_is_ignored() {
    let (mut app, _) = manual_app();
    app.open_add_time();
    app.add_time_text("45 seconds");
    assert!(app.add_time().can_submit());
    app.submit_add_time();
    assert_eq!(app.displayed().to_string(), "00:00:45:00");
}

#[test]
fn cancelled_adjustment_changes_nothing() {
    let (mut app, _) = manual_app();
    app.open_add_time();
    app.add_time_text("120");
    app.cancel_add_time();
    assert!(app.displayed().is_zero());
    assert!(!app.add_time().is_visible());

    // The field reopens empty.
    app.open_add_time();
    assert_eq!(app.add_time().input(), "");
}
