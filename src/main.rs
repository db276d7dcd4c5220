mod app;
mod clock;
mod command;
mod config;
mod keymap;
mod memory;
mod prefs;
mod quiz;
mod session;
mod shuffle;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use command::Tab;
use config::Config;
use prefs::Prefs;

/// Upper bound on how long the loop waits for input
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "memquiz")]
#[command(about = "Memory card game and JavaScript quiz for the terminal")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/memquiz/config.toml")]
    config: String,

    /// Tab shown at startup
    #[arg(long, value_enum, default_value_t = Tab::Game)]
    tab: Tab,

    /// Seed for card and question shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// Prefs file path (overrides config)
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "memquiz=info".into());

    let (file_layer, stderr_layer) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file));
            (Some(layer), None)
        }
        None => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    // Load config
    let config = Config::load(&cli.config)?;

    // Load prefs
    let prefs_path = cli
        .prefs
        .clone()
        .or_else(|| config.prefs_path())
        .unwrap_or_else(Prefs::default_path);
    let prefs = Prefs::open(prefs_path);

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, prefs, cli.tab, rng);
    tracing::info!(tab = ?cli.tab, "memquiz started");

    // Run main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.advance(Instant::now());
        app.resize(terminal.size()?.height);
        terminal.draw(|f| ui::draw(f, app))?;

        // Wake up in time for the next timer, but never sleep past the poll interval
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(POLL_INTERVAL, |wait| wait.min(POLL_INTERVAL));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(command) = keymap::command_for_key(app, key) {
                    app.dispatch(command, Instant::now());
                }
            }
        }

        if app.should_quit() {
            tracing::info!("memquiz exiting");
            return Ok(());
        }
    }
}
