//! Faqline CLI — the main entry point.
//!
//! Commands:
//! - `init`   — Initialize config & data directory
//! - `ask`    — Resolve a single question from the terminal
//! - `serve`  — Start the HTTP chat gateway
//! - `check`  — Diagnose configuration and catalog health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "faqline",
    about = "Faqline — tiered FAQ answering service",
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
    /// Initialize configuration and the FAQ data directory
    Init,

    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        message: String,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Diagnose configuration and catalog health
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Ask { message } => commands::ask::run(message).await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Check => commands::check::run().await?,
    }

    Ok(())
}
