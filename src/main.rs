//! Intake TUI - terminal client intake form
//!
//! A Ratatui-based form that validates client details, mirrors them into a
//! shareable link and submits them to an intake endpoint over HTTP.

mod app;
mod config;
mod platform;
mod state;
mod transport;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::{IntakeConfig, ENDPOINT_ENV};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{IntakeSession, Location};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transport::IntakeClient;

#[derive(Parser, Debug)]
#[command(name = "intake-tui", version, about = "Client onboarding form")]
struct Cli {
    /// Shareable link to prefill the form from
    link: Option<String>,

    /// Submit endpoint (overrides INTAKE_ONBOARD_URL and the config file)
    #[arg(long)]
    endpoint: Option<String>,
}

/// Log to the data directory; the terminal belongs to the UI
fn log_writer() -> BoxMakeWriter {
    let file = IntakeConfig::log_path().and_then(|path| {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::stderr),
    }
}

/// Starting location: the link given on the command line, else the share base
fn initial_location(link: Option<&str>, base: &str) -> Result<Location> {
    if let Some(link) = link {
        match Location::parse(link) {
            Ok(location) => return Ok(location),
            Err(e) => tracing::warn!("Ignoring invalid link {link:?}: {e}"),
        }
    }
    Location::parse(base).with_context(|| format!("Invalid share base URL: {base}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    let config = IntakeConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        IntakeConfig::default()
    });

    let env_endpoint = std::env::var(ENDPOINT_ENV).ok();
    let endpoint = config.resolve_endpoint(cli.endpoint.as_deref(), env_endpoint.as_deref());
    let client = IntakeClient::new(endpoint.as_deref(), config.request_timeout())?;
    if client.endpoint().is_none() {
        tracing::warn!("No intake endpoint configured; submissions will fail");
    }

    let location = initial_location(cli.link.as_deref(), config.share_base_url())?;
    let session = IntakeSession::new(location);
    let mut app = App::new(session, Arc::new(client), config.services());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key)?;
            }
        }

        // Pick up a finished submission
        app.poll_submission();

        if app.should_quit() {
            return Ok(());
        }
    }
}
