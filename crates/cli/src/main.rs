//! FolioChat CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a default config file
//! - `serve`   — Start the HTTP API server
//! - `usage`   — Print the recorded analytics summary
//! - `doctor`  — Diagnose configuration health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "foliochat",
    about = "FolioChat — personal-portfolio chat backend",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Onboard,

    /// Start the HTTP API server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the recorded analytics summary
    Usage,

    /// Diagnose configuration health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Usage => commands::usage::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
