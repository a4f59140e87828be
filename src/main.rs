//! coursehunt - terminal browser for an online course catalog
//!
//! # Usage
//!
//! ```bash
//! # Sign in once
//! coursehunt login -u me@example.com -p secret
//!
//! # Launch interactive TUI
//! coursehunt
//!
//! # CLI mode (for scripting)
//! coursehunt search "rust" --json
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use coursehunt::app::{App, AppEvent};
use coursehunt::cli::{Cli, Command, ExitCode, Output};
use coursehunt::runtime::{self, Runtime};
use coursehunt::{commands, CatalogClient, LocalPlayer};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// How long the key reader blocks before checking for shutdown
const KEY_POLL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = if cli.is_cli_mode() {
        run_cli(cli).await
    } else {
        run_tui(cli).await?
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.into());
    }
    Ok(())
}

/// Log to a file so the TUI's screen stays clean. Logging is best effort.
fn init_logging(verbose: bool) {
    let Some(data_dir) = dirs::data_local_dir().map(|p| p.join("coursehunt")) else {
        return;
    };
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }
    let log_path = data_dir.join("coursehunt.log");
    let Ok(log_file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    else {
        return;
    };

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    info!("Log file: {:?}", log_path);
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let config_dir = cli.config_dir.as_deref();

    match cli.command {
        Some(Command::Login(cmd)) => commands::login_cmd(cmd, config_dir, &output).await,
        Some(Command::Logout) => commands::logout_cmd(config_dir, &output).await,
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, config_dir, &output).await,
        Some(Command::Lessons(cmd)) => commands::lessons_cmd(cmd, config_dir, &output).await,
        // Handled by the is_cli_mode check
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Forward key presses from crossterm into the event queue.
///
/// crossterm's reader blocks, so it lives on the blocking pool and polls
/// with a timeout to notice when the queue has closed.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(KEY_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    error!("terminal poll failed: {}", e);
                    let _ = tx.blocking_send(AppEvent::Quit);
                    break;
                }
            }

            match event::read() {
                // Only handle key press events (ignore releases on Windows)
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.blocking_send(AppEvent::Input(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    error!("terminal read failed: {}", e);
                    let _ = tx.blocking_send(AppEvent::Quit);
                    break;
                }
            }
        }
    })
}

/// SIGINT from outside the terminal (raw mode turns ctrl+c into a key)
fn spawn_signal_listener(tx: mpsc::Sender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received");
            let _ = tx.send(AppEvent::Quit).await;
        }
    })
}

/// Run interactive TUI
async fn run_tui(cli: Cli) -> Result<ExitCode> {
    let output = Output::new(&cli);

    // A missing or expired session refuses to start
    let ctx = match commands::authenticated(cli.config_dir.as_deref(), &output) {
        Ok(ctx) => ctx,
        Err(code) => return Ok(code),
    };

    let player = LocalPlayer::new(ctx.config.player(), ctx.config.player_args().to_vec());
    let catalog = CatalogClient::new(ctx.base_url.clone(), ctx.session.clone());

    let (tx, mut rx) = runtime::channel();
    let runtime = Runtime::new(catalog, player, tx.clone());
    let ticker = runtime::spawn_ticker(tx.clone(), runtime::TICK_RATE);
    let signals = spawn_signal_listener(tx.clone());
    let key_reader = spawn_key_reader(tx);

    let mut terminal = init_terminal()?;
    let mut app = App::new();

    let result = runtime::run(&mut terminal, &mut app, &runtime, &mut rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    // Closing the queue stops both producers
    drop(runtime);
    drop(rx);
    ticker.abort();
    signals.abort();
    let _ = key_reader.await;

    result?;
    Ok(report_session_end(&app))
}

/// A failed fetch ends the session; say why once the screen is restored
fn report_session_end(app: &App) -> ExitCode {
    match &app.last_error {
        Some(e) => {
            eprintln!("{}", e);
            ExitCode::NetworkError
        }
        None => ExitCode::Success,
    }
}
