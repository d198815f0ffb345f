//! CLI administration tool for shortlinks.
//!
//! Inspects links and visits in the PostgreSQL store without going through
//! the HTTP surface.
//!
//! # Usage
//!
//! ```bash
//! # Link and visit totals
//! cargo run --bin admin -- stats
//!
//! # An owner's links with visit totals
//! cargo run --bin admin -- links 6f1c2a9e-0d3b-4b8e-9a55-2f4f7f3c1d20
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the server (`DATABASE_URL` or `DB_*`).

use shortlinks::application::services::StatsService;
use shortlinks::config::{self, StoreBackend};
use shortlinks::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use shortlinks::server::connect_database;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting shortlinks.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show link and visit totals
    Stats,

    /// List an owner's links with visit totals
    Links {
        /// Owner token (the value of the owner cookie)
        owner: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

type PgStatsService = StatsService<PgLinkRepository, PgVisitRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::Config::from_env()?;
    if config.store_backend != StoreBackend::Postgres {
        anyhow::bail!("admin commands require STORE_BACKEND=postgres");
    }

    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::Stats => handle_stats(&stats_service(&pool)).await?,
        Commands::Links { owner } => handle_links(&stats_service(&pool), &owner).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn stats_service(pool: &PgPool) -> PgStatsService {
    let pool = Arc::new(pool.clone());
    StatsService::new(
        Arc::new(PgLinkRepository::new(Arc::clone(&pool))),
        Arc::new(PgVisitRepository::new(pool)),
    )
}

/// Displays link and visit totals.
async fn handle_stats(service: &PgStatsService) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let (links, visits) = service
        .totals()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load totals: {}", e))?;

    println!("  Links:  {}", links.to_string().bright_green().bold());
    println!("  Visits: {}", visits.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Lists an owner's links in creation order.
///
/// # Output Format
///
/// ```text
/// Links for 6f1c2a9e-...
///
///   Token      Visits   Created            Long URL
///   ──────────────────────────────────────────────────────────────
///   aB3dE9fG   12       2024-06-01 10:30   http://example.com/page
/// ```
async fn handle_links(service: &PgStatsService, owner: &str) -> Result<()> {
    println!("{} {}", "Links for".bright_blue().bold(), owner.cyan());
    println!();

    let summaries = service
        .owner_link_summaries(owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if summaries.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<8} {:<18} {}",
        "Token".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Created".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for summary in &summaries {
        println!(
            "  {:<10} {:<8} {:<18} {}",
            summary.short_token.cyan(),
            summary.total_visits.to_string().bright_green(),
            summary
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            summary.long_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        summaries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .fetch_one(pool)
                .await
                .context("Database check failed")?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
