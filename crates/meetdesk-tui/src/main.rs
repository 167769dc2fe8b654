//! meetdesk - a terminal front end for drafting meetings behind a sign-in.
//!
//! The binary wires the configuration, the persisted session store, and the
//! router into a ratatui event loop. A few subcommands manage the session
//! without starting the UI.

mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{age_display, App, AppState};
use meetdesk_core::config::Config;
use meetdesk_core::SessionStore;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file prefix inside the log directory
const LOG_FILE_PREFIX: &str = "meetdesk.log";

const USAGE: &str = "\
Usage: meetdesk [COMMAND]

Commands:
  login    Store an access token (prompted without echo)
  logout   Clear the stored session
  status   Show whether a session is stored
  help     Print this message

Without a command the terminal UI starts.";

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so logs go to a daily file in the data
/// directory. Use RUST_LOG to control the level (e.g., RUST_LOG=debug).
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = config.log_dir().ok()?;
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let (config, config_error) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let _log_guard = init_tracing(&config);
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None => {}
        Some("login") => return login_command(&config),
        Some("logout") => return logout_command(&config),
        Some("status") => return status_command(&config),
        Some("help" | "--help" | "-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(other) => anyhow::bail!("Unknown command: {}\n\n{}", other, USAGE),
    }

    info!("meetdesk starting");

    // Create app before touching the terminal so config errors print normally
    let mut app = App::new(config).context("Failed to initialize application")?;
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("meetdesk shutting down");
    Ok(())
}

fn open_session(config: &Config) -> Result<SessionStore> {
    let storage = config
        .open_storage()
        .context("Failed to open session storage")?;
    Ok(SessionStore::open(storage))
}

/// Prompt for a token without echo and store it
fn login_command(config: &Config) -> Result<()> {
    let token = rpassword::prompt_password("Access token: ").context("Failed to read token")?;
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("No token entered");
    }

    let mut session = open_session(config)?;
    session.establish(token);
    println!("Signed in.");
    Ok(())
}

fn logout_command(config: &Config) -> Result<()> {
    let mut session = open_session(config)?;
    session.clear();
    println!("Signed out.");
    Ok(())
}

fn status_command(config: &Config) -> Result<()> {
    let session = open_session(config)?;
    let state = if session.is_authenticated() {
        "Authenticated"
    } else {
        "Anonymous"
    };
    let saved = session
        .saved_at()
        .map(|at| age_display(at, chrono::Utc::now()))
        .unwrap_or_else(|| "never".to_string());
    println!("{} (saved {})", state, saved);
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
