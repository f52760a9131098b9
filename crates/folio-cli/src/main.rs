use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::{AppConfig, Portfolio};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "A terminal portfolio viewer with looping media galleries")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (default: ~/.config/folio/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Portfolio content file (overrides `general.content`)
    #[arg(short = 'p', long = "portfolio", global = true)]
    portfolio: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the portfolio in the terminal
    Run,
    /// Validate the portfolio file and report problems
    Check,
    /// List projects and navigation buckets
    List,
    /// Write a default config and a sample portfolio
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load()?,
    };
    if let Some(path) = cli.portfolio {
        config.general.content = Some(path);
    }
    let config = Arc::new(config);

    let command = cli.command.unwrap_or(Commands::Run);
    init_logging(&config, matches!(command, Commands::Run))?;

    match command {
        Commands::Run => {
            let portfolio = Portfolio::load(&config.content_path())?;
            commands::run::run(config, portfolio).await
        }
        Commands::Check => commands::check::run(&config),
        Commands::List => commands::list::run(&config),
        Commands::Init { force } => commands::init::run(&config, cli.config.as_deref(), force),
    }
}

/// Log to a file while the TUI owns the terminal, to stderr otherwise
fn init_logging(config: &AppConfig, tui: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if tui {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
