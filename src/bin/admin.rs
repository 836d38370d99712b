//! CLI administration tool for short-url.
//!
//! Manages creators and their API tokens, shows statistics, and performs
//! database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a creator
//! cargo run --bin admin -- creator create --email alice@example.com --name Alice
//!
//! # Issue an API token for a creator
//! cargo run --bin admin -- token create --email alice@example.com --name laptop
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke laptop
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `TOKEN_SIGNING_SECRET`: required by `token create`; must match the server

use short_url::config::{Config, mask_connection_string};
use short_url::domain::entities::{NewCreator, Role};
use short_url::domain::repositories::{CreatorRepository, TokenRepository};
use short_url::infrastructure::persistence::{PgCreatorRepository, PgTokenRepository};
use short_url::utils::token::{generate_token, hash_token};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-url.
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
    /// Manage link creators
    Creator {
        #[command(subcommand)]
        action: CreatorAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Creator management subcommands.
#[derive(Subcommand)]
enum CreatorAction {
    /// Register a new creator
    Create {
        /// Unique email address
        #[arg(short, long)]
        email: Option<String>,

        /// Display name shown next to links
        #[arg(short, long)]
        name: Option<String>,

        /// Grant the admin role
        #[arg(long)]
        admin: bool,
    },

    /// List all creators
    List,
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Email of the creator the token authenticates as
        #[arg(short, long)]
        email: Option<String>,

        /// Token name (e.g., "laptop", "CI")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url().context("Database is not configured")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Creator { action } => handle_creator_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches creator management commands.
async fn handle_creator_action(action: CreatorAction, pool: &PgPool) -> Result<()> {
    let repo = PgCreatorRepository::new(Arc::new(pool.clone()));

    match action {
        CreatorAction::Create { email, name, admin } => {
            create_creator(&repo, email, name, admin).await?
        }
        CreatorAction::List => list_creators(&repo).await?,
    }

    Ok(())
}

async fn create_creator(
    repo: &PgCreatorRepository,
    email: Option<String>,
    name: Option<String>,
    admin: bool,
) -> Result<()> {
    println!("{}", "👤 Create Creator".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Display name").interact_text()?,
    };

    let role = if admin { Role::Admin } else { Role::User };

    let creator = repo
        .create(NewCreator {
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            role,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create creator: {}", e))?;

    println!("{}", "✅ Creator created".green().bold());
    println!("  ID:    {}", creator.id.to_string().bright_black());
    println!("  Email: {}", creator.email.cyan());
    println!("  Name:  {}", creator.name.cyan());
    println!("  Role:  {}", creator.role.to_string().bright_white());
    println!();
    println!(
        "  Issue a token with: {} admin -- token create --email {}",
        "cargo run --bin".bright_cyan(),
        creator.email
    );
    println!();

    Ok(())
}

async fn list_creators(repo: &PgCreatorRepository) -> Result<()> {
    println!("{}", "📋 Creators".bright_blue().bold());
    println!();

    let creators = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list creators: {}", e))?;

    if creators.is_empty() {
        println!("{}", "  No creators found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<32} {:<24} {:<6} {}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Name".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(85).bright_black());

    for record in &creators {
        let c = &record.creator;
        let role = match c.role {
            Role::Admin => c.role.to_string().magenta(),
            Role::User => c.role.to_string().normal(),
        };
        println!(
            "  {:<5} {:<32} {:<24} {:<6} {}",
            c.id.to_string().bright_black(),
            c.email.cyan(),
            c.name,
            role,
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        creators.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let tokens = PgTokenRepository::new(pool.clone());

    match action {
        TokenAction::Create {
            email,
            name,
            token,
            yes,
        } => {
            let creators = PgCreatorRepository::new(pool);
            create_token(&tokens, &creators, email, name, token, yes).await?;
        }
        TokenAction::List => list_tokens(&tokens).await?,
        TokenAction::Revoke { name_or_id } => revoke_token(&tokens, name_or_id).await?,
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Flow
///
/// 1. Resolve the creator by email (prompted if not provided)
/// 2. Prompt for token name (or use provided)
/// 3. Generate random token or use provided value
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Store the HMAC-SHA256 of the token, keyed by `TOKEN_SIGNING_SECRET`
///
/// # Security
///
/// - Only the HMAC is stored in the database
/// - Raw token is displayed once and cannot be retrieved later
/// - Tokens are 48 characters (alphanumeric) for high entropy
async fn create_token(
    tokens: &PgTokenRepository,
    creators: &PgCreatorRepository,
    email: Option<String>,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let signing_secret = std::env::var("TOKEN_SIGNING_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .context("TOKEN_SIGNING_SECRET must be set to the server's value")?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Creator email").interact_text()?,
    };

    let creator = creators
        .find_by_email(email.trim())
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No creator with email '{}'", email.trim()))?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("default")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            println!("{}", "✨ Generated new token".green());
            generate_token()
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Creator: {} <{}>", creator.name.cyan(), creator.email);
    println!("  Name:    {}", token_name.cyan());
    println!("  Token:   {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(&signing_secret, &token_value);

    tokens
        .create_token(creator.id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/my/short-urls",
        token_value.bright_yellow()
    );
    println!();
    println!("Or paste it into the login page to use the web UI.");
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  Name                 Creator   Created           Last used         Status
///   ──────────────────────────────────────────────────────────────────────────────
///   1   laptop               1         2026-01-15 10:30  2026-01-16 09:12  ACTIVE
///   2   CI                   1         2026-01-16 14:20  never             REVOKED
/// ```
async fn list_tokens(repo: &PgTokenRepository) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<20} {:<8} {:<17} {:<17} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Creator".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<4} {:<20} {:<8} {:<17} {:<17} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.creator_id,
            token.created_at.format("%Y-%m-%d %H:%M").to_string(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// # Lookup
///
/// - If input is numeric, lookup by ID
/// - Otherwise, lookup by name (most recent exact match)
async fn revoke_token(repo: &PgTokenRepository, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token:   {}", token.name.cyan());
    println!("  ID:      {}", token.id.to_string().bright_black());
    println!("  Creator: {}", token.creator_id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Link counts by visibility and expiry
/// - Total number of clicks
/// - Number of creators and active API tokens
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links, private, expired, clicks): (i64, i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COUNT(*) FILTER (WHERE is_private),
               COUNT(*) FILTER (WHERE expires_at < NOW()),
               COALESCE(SUM(click_count), 0)::bigint
        FROM short_urls
        "#,
    )
    .fetch_one(pool)
    .await?;

    let creators: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM creators")
        .fetch_one(pool)
        .await?;

    let tokens: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!("  Links:         {}", links.to_string().bright_green().bold());
    println!("    private:     {}", private.to_string().bright_white());
    println!("    expired:     {}", expired.to_string().bright_white());
    println!("  Clicks:        {}", clicks.to_string().bright_green().bold());
    println!("  Creators:      {}", creators.to_string().bright_green().bold());
    println!("  Active tokens: {}", tokens.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await
                    .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Migration failed")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
