//! Trailpass CLI - database migrations and seed data.
//!
//! # Usage
//!
//! ```bash
//! # Run portal database migrations
//! trailpass-cli migrate
//!
//! # Seed the catalog (parks and products); idempotent
//! trailpass-cli seed
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "trailpass-cli")]
#[command(author, version, about = "Trailpass CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run portal database migrations
    Migrate,
    /// Seed the catalog with parks and products (idempotent)
    Seed,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
