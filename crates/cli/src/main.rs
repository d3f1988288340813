//! ShopSphere CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (including the session store table)
//! shopsphere-cli migrate
//!
//! # Seed the catalog with demo data
//! shopsphere-cli seed
//!
//! # Create a staff account (may append tracking updates)
//! shopsphere-cli staff create -e staff@example.com -p <password>
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shopsphere-cli")]
#[command(author, version, about = "ShopSphere CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog with demo data
    Seed,
    /// Manage staff accounts
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    /// Create a new staff account
    Create {
        /// Staff email address
        #[arg(short, long)]
        email: String,

        /// Password for the account
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
        Commands::Seed => commands::seed::run().await?,
        Commands::Staff { action } => match action {
            StaffAction::Create { email, password } => {
                commands::staff::create(&email, &password).await?;
            }
        },
    }
    Ok(())
}
