// Entry point for the storefront command line tool

mod commands;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storefront_api::{Credentials, HttpNetwork, SiteId};
use storefront_store::{Dispatcher, SqliteStorage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::notes::NotesCommand;
use crate::commands::orders::OrdersCommand;
use crate::commands::stats::StatsArgs;
use crate::commands::CommandContext;
use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Inspect and manage storefront orders")]
struct Cli {
    /// Site to act on; overrides STOREFRONT_SITE_ID
    #[arg(long, global = true)]
    site: Option<SiteId>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Orders of the site
    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },

    /// Notes attached to an order
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },

    /// Order statistics
    Stats(StatsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_store=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(api_url = %config.api_url, database_url = %config.database_url, "Configuration loaded");

    let network = HttpNetwork::with_timeout(
        Credentials::new(config.api_url.clone(), config.api_token.clone()),
        config.http_timeout,
    )
    .context("Failed to build HTTP client")?;

    let storage = Arc::new(
        SqliteStorage::new(&config.database_url)
            .await
            .context("Failed to open local storage")?,
    );

    let ctx = CommandContext {
        site_id: cli.site.or(config.site_id),
        dispatcher: Dispatcher::with_default_stores(Arc::new(network), storage.clone()),
        storage,
    };

    match cli.command {
        Commands::Orders { command } => commands::orders::run(&ctx, command).await,
        Commands::Notes { command } => commands::notes::run(&ctx, command).await,
        Commands::Stats(args) => commands::stats::run(&ctx, args).await,
    }
}
