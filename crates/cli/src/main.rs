//! Uplift CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! uplift-cli migrate
//!
//! # Verify the configured admin identity accepts a credential pair
//! uplift-cli check-admin -e ops@example.org -p 'the password'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `check-admin` - Verify credentials against the configured identity

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "uplift-cli")]
#[command(author, version, about = "Uplift CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Verify a credential pair against the configured admin identity
    CheckAdmin {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::CheckAdmin { email, password } => {
            commands::admin::check(&email, &password)?;
        }
    }
    Ok(())
}
