//! Basecamp CLI
//!
//! Administration commands that run against the store directly: seeding,
//! migrations, and password hashing for operational use.

#![allow(clippy::print_stdout)]

use std::sync::Arc;

use application::ports::PasswordHasher as _;
use clap::{Parser, Subcommand};
use infrastructure::seed::DEFAULT_SEED_COUNT;
use infrastructure::{AppConfig, Argon2PasswordHasher, create_pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Basecamp CLI
#[derive(Parser)]
#[command(name = "basecamp-cli")]
#[command(author, version, about = "Basecamp administration CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wipe and repopulate the campground collection with sample data
    ///
    /// Destructive: every campground and review is deleted first.
    /// Running it twice leaves exactly --count records.
    Seed {
        /// Number of campgrounds to create
        #[arg(long, default_value_t = DEFAULT_SEED_COUNT)]
        count: usize,

        /// Database path (overrides configuration)
        #[arg(long, env = "DB_URL")]
        database: Option<String>,
    },

    /// Run pending database migrations and exit
    Migrate {
        /// Database path (overrides configuration)
        #[arg(long, env = "DB_URL")]
        database: Option<String>,
    },

    /// Hash a password with Argon2id for operational use
    ///
    /// The output is a PHC string suitable for the users table.
    HashPassword {
        /// The plaintext password to hash
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Seed { count, database } => {
            let pool = open_pool(database)?;
            let summary = infrastructure::seed::run(pool, count)
                .await
                .map_err(|e| anyhow::anyhow!("seeding failed: {e}"))?;
            println!(
                "Seeded {} campgrounds ({} stale reviews removed)",
                summary.campgrounds, summary.reviews_removed
            );
        },
        Commands::Migrate { database } => {
            // Pool creation runs migrations when enabled.
            let _pool = open_pool(database)?;
            println!("Migrations complete");
        },
        Commands::HashPassword { password } => {
            let hash = Argon2PasswordHasher::new()
                .hash(&password)
                .map_err(|e| anyhow::anyhow!("hashing failed: {e}"))?;
            println!("{hash}");
        },
    }

    Ok(())
}

/// Open the pool from configuration, with an optional path override
fn open_pool(
    database: Option<String>,
) -> anyhow::Result<Arc<infrastructure::ConnectionPool>> {
    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(path) = database {
        config.database.path = path;
    }
    if config.database.path.is_empty() {
        anyhow::bail!("database path is not set (DB_URL or database.path)");
    }
    Ok(Arc::new(create_pool(&config.database)?))
}
