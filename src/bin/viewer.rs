//! TUI Dashboard Viewer
//!
//! Live terminal dashboard for the gas tracker backend: current gas price,
//! transaction costs in USD, usage statistics and alert registration.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use gastrack::config::Config;
use gastrack::viewer::App;

#[derive(Parser, Debug)]
#[command(name = "gastrack-viewer")]
#[command(about = "Terminal dashboard for gas prices and alerts", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend URL (overrides config file)
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Market-data price endpoint (overrides config file)
    #[arg(short, long, value_name = "URL")]
    market_url: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    // Logs go to a file since the terminal belongs to the TUI
    let log_path = dirs::data_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
        .join("gastrack")
        .join("viewer.log");

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    let level = if debug { Level::DEBUG } else { Level::INFO };

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .with_ansi(false)
                .with_max_level(level)
                .with_writer(file)
                .init();
        }
        Err(_) => {
            // Without a log file only errors reach stderr
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .with_max_level(Level::ERROR)
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;

    // Override with CLI args if provided
    let config = Config {
        api_url: args.url.unwrap_or(config.api_url),
        market_data_url: args.market_url.unwrap_or(config.market_data_url),
        debug: args.debug || config.debug,
        ..config
    };

    init_logging(config.debug);
    tracing::info!("starting dashboard against {}", config.api_url);

    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}
