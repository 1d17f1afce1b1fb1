use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod bridge;
mod input;
mod state;
mod terminal;
mod ui;

use app::App;
use terminal::Terminal;

const DEFAULT_PORT: u16 = 3409;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let port = resolve_port();
    let mut terminal = Terminal::new()?;
    let mut app = App::new(port).await?;

    let result = app.run(&mut terminal).await;

    terminal.restore()?;

    result
}

fn resolve_port() -> u16 {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DECK_PORT").ok())
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,deck=info,actions=info"));

    // Write logs to file instead of stderr to avoid breaking the TUI
    let log_dir = dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".deck");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("deck.log"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(Mutex::new(log_file)))
        .init();

    Ok(())
}
