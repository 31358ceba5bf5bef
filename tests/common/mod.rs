//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use task_timer_core::{App, ManualClock, UiOptions};

/// An app driven by a manual clock, plus a handle to that clock.
pub fn manual_app() -> (App<ManualClock>, ManualClock) {
    manual_app_with(UiOptions::default())
}

pub fn manual_app_with(options: UiOptions) -> (App<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (App::with_clock(clock.clone(), options), clock)
}

/// Lay out a minimal static export: index, error page and one hashed bundle.
pub fn write_site(root: &Path) {
    fs::create_dir_all(root.join("_next/static/chunks")).expect("create site dirs");
    fs::write(
        root.join("index.html"),
        "<!doctype html><title>Timer</title><div id=timer></div>",
    )
    .expect("write index");
    fs::write(root.join("404.html"), "<!doctype html><title>Not found</title>")
        .expect("write 404");
    fs::write(
        root.join("_next/static/chunks/main.js"),
        "console.log('timer')",
    )
    .expect("write bundle");
}
