// Stock Market Simulator - CLI
// Generate a synthetic market and trade against it

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn, Level};
use stock_market_sim::Config;

// Load command modules from cli directory
#[path = "../cli/market_commands.rs"]
mod market_commands;
#[path = "../cli/session_commands.rs"]
mod session_commands;

#[derive(Parser)]
#[command(name = "market-sim")]
#[command(version = "0.1.0")]
#[command(about = "Educational stock market simulator", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate a market history and print a summary
    Generate {
        /// Override the configured seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of recent events to show
        #[arg(short, long, default_value = "10")]
        events: usize,

        /// Write the full history as JSON
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Start an interactive trading session
    Session,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging first (before config load so we can see config errors)
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Market Simulator v0.1.0");

    match cli.command {
        Commands::Init { force } => {
            init_config(&cli.config, force)?;
        }

        Commands::Generate { seed, events, export } => {
            let config = load_config_or_exit(&cli.config);
            market_commands::generate_market(&config, seed, events, export.as_deref())?;
        }

        Commands::Session => {
            let config = load_config_or_exit(&cli.config);
            session_commands::run_session(&config)?;
        }
    }

    Ok(())
}

/// Load config or exit with helpful error message
fn load_config_or_exit(path: &str) -> Config {
    match Config::load_or_error(path) {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration Error");
            error!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}

fn init_config(path: &str, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if Path::new(path).exists() && !force {
        warn!("⚠️  {} already exists, skipping (use --force to overwrite)", path);
        return Ok(());
    }

    let default_config = include_str!("../../config.toml.example");
    std::fs::write(path, default_config)?;
    info!("📝 Created {}", path);
    info!("💡 Next steps:");
    info!("   1. Run: market-sim generate");
    info!("   2. Run: market-sim session");

    Ok(())
}
