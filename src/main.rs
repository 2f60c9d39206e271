//! Nexor process monitor
//!
//! A terminal monitor that tracks well-known desktop applications and shows
//! their live CPU and memory usage. Sampling runs on a background worker;
//! the front end only renders the latest published snapshot.
//!
//! Controls:
//! - q / Ctrl-C: Quit
//! - /: Search by name or PID
//! - s: Cycle sort (Name, CPU, Memory)
//! - 1/2/3: Sort by Name / CPU / Memory
//! - r / F5: Refresh now
//! - k / Delete: Terminate selected application (with confirmation)
//! - ↑/↓: Navigate the list
//! - PgUp/PgDown: Scroll by page
//! - Home/End: Jump to start/end

mod app;
mod constants;
#[cfg(windows)]
mod ffi;
mod system;
mod ui;

use std::fs::File;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::Receiver;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};

use app::{App, Args, KeyAction, MonitorUpdate, RefreshScheduler};
use constants::{APP_NAME, APP_VERSION};
use system::SystemBackend;
use ui::{render, visible_rows, write_plain, PLAIN_WIDTH};

/// How long a key poll waits before checking for new updates
const INPUT_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    info!(
        "{} {} starting, watching {} known applications",
        APP_NAME,
        APP_VERSION,
        app::registry::known_app_count()
    );

    let (scheduler, updates) = RefreshScheduler::start(SystemBackend::new(), args.refresh_interval())
        .context("failed to start the refresh worker")?;
    let mut app = App::with_args(&args);

    if args.once {
        run_once(&mut app, &updates)?;
    } else {
        run_interactive(&mut app, &scheduler, &updates)?;
    }

    drop(scheduler);
    info!("{} closed", APP_NAME);
    Ok(())
}

/// Logs go to `--log-file` when given. Without one, interactive mode logs
/// nothing since stderr would draw over the alternate screen.
fn init_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info).parse_default_env();

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if !args.once => return Ok(()),
        None => {}
    }

    builder.try_init().context("logger already initialized")
}

/// Waits for two passes (the second one interval after the first), then
/// prints the list.
fn run_once(app: &mut App, updates: &Receiver<MonitorUpdate>) -> Result<()> {
    let timeout = app.refresh_interval * 2 + Duration::from_secs(5);
    for _ in 0..2 {
        let update = updates
            .recv_timeout(timeout)
            .context("refresh worker stopped before sampling finished")?;
        app.apply_update(update);
    }

    let mut stdout = io::stdout().lock();
    write_plain(&mut stdout, app, PLAIN_WIDTH)?;
    Ok(())
}

fn run_interactive(app: &mut App, scheduler: &RefreshScheduler, updates: &Receiver<MonitorUpdate>) -> Result<()> {
    let mut stdout = io::stdout();

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen, DisableLineWrap, Hide)?;

    let result = event_loop(&mut stdout, app, scheduler, updates);

    // Restore terminal even when the loop failed
    execute!(stdout, Show, EnableLineWrap, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    stdout.flush()?;

    result
}

fn event_loop(
    stdout: &mut io::Stdout,
    app: &mut App,
    scheduler: &RefreshScheduler,
    updates: &Receiver<MonitorUpdate>,
) -> Result<()> {
    loop {
        // Only the newest state matters, but every update carries events
        while let Ok(update) = updates.try_recv() {
            app.apply_update(update);
        }

        render(stdout, app)?;

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        // Only handle key PRESS events, ignore Release and Repeat
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key_event, visible_rows()?) {
            KeyAction::Continue => {}
            KeyAction::Exit => return Ok(()),
            KeyAction::Refresh => scheduler.request_refresh(),
            KeyAction::Terminate(request) => scheduler.terminate(request.pid, request.name),
        }
    }
}
