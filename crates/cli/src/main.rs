//! ShopDesk CLI - Operational tools for the console deployment.
//!
//! # Usage
//!
//! ```bash
//! # Create the console's session store schema
//! shopdesk-cli migrate
//!
//! # Verify the ShopDesk API is reachable
//! shopdesk-cli check-api
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the session store schema in PostgreSQL
//! - `check-api` - Ping the ShopDesk API health endpoint

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopdesk-cli")]
#[command(author, version, about = "ShopDesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the session store schema used by the console
    Migrate,
    /// Verify the ShopDesk API answers its health endpoint
    CheckApi,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await.map_err(Into::into),
        Commands::CheckApi => commands::check_api::run().await.map_err(Into::into),
    }
}
