mod input;
mod render;
mod shell;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_core::{
    load_config, validate_config, Config, Database, MetadataSource, MovieCatalog, OmdbClient,
    ReviewStore, SanitizedConfig, SqliteCatalog, SqliteReviewStore, SqliteUserStore,
    SqliteWatchlistStore, UserStore, WatchlistStore,
};

use shell::Shell;

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MARQUEE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration; a missing file just means defaults
    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!("No config file at {:?}, using defaults", config_path);
        Config::default()
    };

    validate_config(&config).context("Configuration validation failed")?;
    debug!("Configuration: {:?}", SanitizedConfig::from(&config));

    // Open the single persistent database
    let database = Database::open(&config.database.path).context("Failed to open database")?;
    info!("Database ready at {:?}", config.database.path);

    // Build stores over the shared connection
    let catalog: Box<dyn MovieCatalog> = Box::new(SqliteCatalog::new(database.handle()));
    let users: Box<dyn UserStore> = Box::new(SqliteUserStore::new(database.handle()));
    let watchlist: Box<dyn WatchlistStore> = Box::new(SqliteWatchlistStore::new(database.handle()));
    let reviews: Box<dyn ReviewStore> = Box::new(SqliteReviewStore::new(database.handle()));

    // Metadata client is optional; browsing works without it
    let metadata: Option<Box<dyn MetadataSource>> = match &config.metadata {
        Some(metadata_config) => {
            let client =
                OmdbClient::new(metadata_config).context("Failed to create OMDb client")?;
            info!("OMDb client ready");
            Some(Box::new(client))
        }
        None => {
            info!("No [metadata] section configured; fetching disabled");
            None
        }
    };

    let mut shell = Shell::new(catalog, users, watchlist, reviews, metadata);
    shell.run();

    Ok(())
}
