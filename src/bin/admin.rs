//! CLI administration tool for shortlink.
//!
//! Runs the same services as the HTTP server directly against the database.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Resolve a code
//! cargo run --bin admin -- resolve aZ3kQ9
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`shortlink::config`].

use shortlink::application::services::{ResolveError, ShortenError};
use shortlink::config::{self, Config};
use shortlink::domain::repositories::UrlRepository;
use shortlink::infrastructure::metrics::NoopObserver;
use shortlink::infrastructure::persistence::{self, SqliteUrlRepository};
use shortlink::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Shorten a URL
    Shorten {
        /// URL to shorten (stored exactly as given)
        url: String,
    },

    /// Resolve a short code to its original URL
    Resolve {
        /// Short code
        code: String,
    },

    /// Show statistics
    Stats,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    let pool = persistence::connect(&config).await?;
    let repository = Arc::new(SqliteUrlRepository::new(
        Arc::new(pool.clone()),
        Arc::new(NoopObserver::new()),
    ));

    let result = match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool, &repository).await,
        Commands::Shorten { url } => shorten(&config, repository.clone(), &url).await,
        Commands::Resolve { code } => resolve(&config, repository.clone(), &code).await,
        Commands::Stats => handle_stats(&repository).await,
    };

    repository.close().await;
    result
}

fn app_state(config: &Config, repository: Arc<SqliteUrlRepository>) -> AppState {
    AppState::new(
        repository,
        Arc::new(NoopObserver::new()),
        config.url_validator(),
        config.shorten_settings(),
    )
}

/// Shortens a URL and prints the issued code.
async fn shorten(config: &Config, repository: Arc<SqliteUrlRepository>, url: &str) -> Result<()> {
    let state = app_state(config, repository);

    match state.shorten_service.shorten(url).await {
        Ok(shortened) => {
            println!("{}", "Short link created".green().bold());
            println!("  Code:      {}", shortened.code.bright_yellow().bold());
            println!("  Short URL: {}", shortened.short_url.cyan());
            Ok(())
        }
        Err(ShortenError::InvalidUrl(reason)) => {
            println!("{} {}", "Invalid URL:".red().bold(), reason);
            anyhow::bail!("Invalid URL '{}': {}", url, reason)
        }
        Err(e) => Err(anyhow::anyhow!("Failed to shorten URL: {}", e)),
    }
}

/// Resolves a code and prints the stored URL.
async fn resolve(config: &Config, repository: Arc<SqliteUrlRepository>, code: &str) -> Result<()> {
    let state = app_state(config, repository);

    match state.redirect_resolver.resolve(code).await {
        Ok(url) => {
            println!("  {} -> {}", code.bright_yellow(), url.cyan());
            Ok(())
        }
        Err(ResolveError::NotFound) => {
            println!("{} {}", "Not found:".yellow().bold(), code);
            anyhow::bail!("Short code '{}' not found", code)
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve code: {}", e)),
    }
}

/// Displays the number of stored mappings.
async fn handle_stats(repository: &SqliteUrlRepository) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let count = repository
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("  Links: {}", count.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    pool: &sqlx::SqlitePool,
    repository: &SqliteUrlRepository,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            repository
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            persistence::migrate(pool).await?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
