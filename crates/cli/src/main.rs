//! Globetrot CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! globetrot migrate
//!
//! # Seed the country catalog
//! globetrot seed
//!
//! # Create a member (ambient deployments need at least one)
//! globetrot user add -n "Angela" -c teal
//!
//! # List members
//! globetrot user list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert the embedded country catalog
//! - `user add` / `user list` - Manage members

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "globetrot")]
#[command(author, version, about = "Globetrot CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the country catalog
    Seed,
    /// Manage members
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new member
    Add {
        /// Member display name
        #[arg(short, long)]
        name: String,

        /// Accent color (one of the dashboard palette; defaults to teal)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List all members
    List,
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
        Commands::Seed => commands::seed::run().await?,
        Commands::User { action } => match action {
            UserAction::Add { name, color } => {
                commands::user::add(&name, color.as_deref()).await?;
            }
            UserAction::List => commands::user::list().await?,
        },
    }
    Ok(())
}
