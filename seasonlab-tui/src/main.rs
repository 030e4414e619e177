//! SeasonLab TUI: seasonal chart viewer.
//!
//! Usage: `seasonlab-tui [TICKER]` (defaults to ^GSPC). Set `SEASONLAB_LOG`
//! to a file path to capture logs; the terminal itself is never logged to.

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use seasonlab_core::data::build_provider;
use seasonlab_core::{ReportCache, SeasonLabConfig, SeasonalityService};
use seasonlab_tui::worker::{self, WorkerCommand};
use seasonlab_tui::{input, ui, AppState};

const DEFAULT_TICKER: &str = "^GSPC";

fn main() -> Result<()> {
    init_logging()?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config = load_config()?;
    let provider = build_provider(&config.provider)?;
    let service = SeasonalityService::new(provider, ReportCache::from_config(&config.cache));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(service, cmd_rx, resp_tx);

    let mut app = AppState::new(cmd_tx.clone(), resp_rx);
    app.input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_TICKER.to_string());
    app.submit();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker. A fetch in flight finishes first; the provider
    // timeout bounds the wait.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    drop(app);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// File logging when `SEASONLAB_LOG` names a path; otherwise silent.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("SEASONLAB_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", PathBuf::from(&path).display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config() -> Result<SeasonLabConfig> {
    let path = dirs::config_dir().map(|d| d.join("seasonlab").join("config.toml"));
    match path {
        Some(path) if path.exists() => SeasonLabConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display())),
        _ => Ok(SeasonLabConfig::default()),
    }
}
