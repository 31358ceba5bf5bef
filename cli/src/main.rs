//! Task Timer CLI - binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI bridges [`task_timer_core`] (stopwatch state) and [`task_timer_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed cleanup.
//!
//! ```text
//! main() -> Command::Run    -> TerminalSession::new(mode) -> run_app() -> App + TUI
//!        -> Command::Deploy -> commands::deploy() -> task_timer_deploy::synth()
//!        -> Command::Format -> commands::format()
//! ```
//!
//! # Event Loop
//!
//! The stopwatch refreshes on a fixed cadence (10 ms by default):
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`task_timer_tui::InputPump`])
//! 3. Advance stopwatch state (`app.tick()`)
//! 4. Update the window title when the compact time changed
//! 5. Render frame

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{TerminalOptions, Viewport, prelude::*};
use std::{
    env,
    fs::{self, OpenOptions},
    io::{Stdout, Write, stdout},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use task_timer_config::TimerConfig;
use task_timer_core::App;
use task_timer_tui::{
    INLINE_VIEWPORT_HEIGHT, InputPump, clear_inline_viewport, draw, draw_inline, handle_events,
};

#[derive(Debug, Parser)]
#[command(name = "task-timer", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive stopwatch (default).
    Run {
        /// Render inline below the shell prompt instead of full screen.
        #[arg(long)]
        inline: bool,
    },
    /// Synthesize the hosting stack manifest for the compiled site.
    Deploy(commands::DeployArgs),
    /// Print a duration in milliseconds as HH:MM:SS:CC.
    Format(commands::FormatArgs),
}

fn init_tracing(to_file: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if !to_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
        return;
    }

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the TUI
    // by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.task-timer/logs/task-timer.log
    if let Some(config_dir) = task_timer_config::config_dir() {
        candidates.push(config_dir.join("logs").join("task-timer.log"));
    }

    // Fallback: ./.task-timer/logs/task-timer.log
    candidates.push(
        PathBuf::from(".task-timer")
            .join("logs")
            .join("task-timer.log"),
    );

    candidates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiMode {
    Full,
    Inline,
}

impl UiMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inline" => Some(UiMode::Inline),
            "full" | "fullscreen" => Some(UiMode::Full),
            _ => None,
        }
    }

    fn from_config(config: Option<&TimerConfig>) -> Option<Self> {
        let raw = config
            .and_then(|cfg| cfg.app.as_ref())
            .and_then(|app| app.tui.as_ref())?;
        let mode = Self::parse(raw);
        if mode.is_none() {
            tracing::warn!("Unknown tui mode in config: {}", raw);
        }
        mode
    }

    fn from_env() -> Option<Self> {
        env::var("TASK_TIMER_TUI")
            .ok()
            .and_then(|value| Self::parse(&value))
    }
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Manages raw mode, bracketed paste and (full mode only) the alternate screen.
/// On drop, all terminal state is restored, so the shell stays usable even
/// after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    use_alternate_screen: bool,
}

impl TerminalSession {
    fn new(mode: UiMode) -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnableBracketedPaste) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        let use_alternate_screen = matches!(mode, UiMode::Full);
        if use_alternate_screen && let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
            return Err(err.into());
        }

        let backend = CrosstermBackend::new(out);
        let terminal = match mode {
            UiMode::Full => Terminal::new(backend),
            UiMode::Inline => Terminal::with_options(
                backend,
                TerminalOptions {
                    viewport: Viewport::Inline(INLINE_VIEWPORT_HEIGHT),
                },
            ),
        };
        let terminal = match terminal {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let mut out = stdout();
                if use_alternate_screen {
                    let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
                } else {
                    let _ = execute!(out, DisableBracketedPaste);
                }
                return Err(err.into());
            }
        };

        Ok(Self {
            terminal,
            use_alternate_screen,
        })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if self.use_alternate_screen {
            let _ = execute!(
                self.terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableBracketedPaste
            );
        } else {
            let _ = clear_inline_viewport(&mut self.terminal);
            let _ = execute!(self.terminal.backend_mut(), DisableBracketedPaste);
        }
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Run { inline: false });

    init_tracing(matches!(command, Command::Run { .. }));

    // A broken config file is logged by `load` and should not keep the stopwatch from starting.
    let config = TimerConfig::load().ok().flatten();

    match command {
        Command::Run { inline } => run(config.as_ref(), inline).await,
        Command::Deploy(args) => commands::deploy(args, config.as_ref()),
        Command::Format(args) => commands::format(&args),
    }
}

async fn run(config: Option<&TimerConfig>, inline: bool) -> Result<()> {
    let ui_mode = if inline {
        UiMode::Inline
    } else {
        UiMode::from_config(config)
            .or_else(UiMode::from_env)
            .unwrap_or(UiMode::Full)
    };
    let defaults = TimerConfig::default();
    let config = config.unwrap_or(&defaults);
    let refresh = config.refresh_interval();

    let mut app = App::new(config.ui_options());
    tracing::info!(?ui_mode, refresh_ms = refresh.as_millis() as u64, "Starting stopwatch");

    let result = {
        let mut session = TerminalSession::new(ui_mode)?;
        run_app(&mut session.terminal, &mut app, ui_mode, refresh).await
    };

    if let Err(err) = &result {
        tracing::error!("Stopwatch loop failed: {err:?}");
    }
    tracing::info!(elapsed = %app.displayed(), "Stopwatch closed");
    result
}

async fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mode: UiMode,
    refresh: Duration,
) -> Result<()>
where
    B: Backend + Write,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(refresh);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        match handle_events(app, &mut input) {
            Ok(true) => break Ok(()),
            Ok(false) => {}
            Err(e) => break Err(e),
        }

        app.tick();

        if let Some(title) = app.take_title_change()
            && let Err(e) = execute!(terminal.backend_mut(), SetTitle(title))
        {
            break Err(e.into());
        }

        let drawn = match mode {
            UiMode::Full => terminal.draw(|frame| draw(frame, app)).map(|_| ()),
            UiMode::Inline => terminal.draw(|frame| draw_inline(frame, app)).map(|_| ()),
        };
        if let Err(e) = drawn {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, UiMode};
    use clap::Parser;

    #[test]
    fn ui_mode_parsing() {
        assert_eq!(UiMode::parse("inline"), Some(UiMode::Inline));
        assert_eq!(UiMode::parse(" Full "), Some(UiMode::Full));
        assert_eq!(UiMode::parse("fullscreen"), Some(UiMode::Full));
        assert_eq!(UiMode::parse("windowed"), None);
    }

    #[test]
    fn no_subcommand_runs_the_stopwatch() {
        let cli = Cli::try_parse_from(["task-timer"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["task-timer", "run", "--inline"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Run { inline: true })));
    }

    #[test]
    fn deploy_flags_parse() {
        let cli = Cli::try_parse_from([
            "task-timer",
            "deploy",
            "--domain",
            "timer.example.com",
            "--site-dir",
            "build",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Deploy(args)) => {
                assert_eq!(args.domain.as_deref(), Some("timer.example.com"));
                assert_eq!(args.site_dir.unwrap().to_str(), Some("build"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
