//! Pool Routes - command line front end for the route repository

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pool_routes::cli::{Cli, Command};
use pool_routes::config::Config;
use pool_routes::db::{InMemoryDirectory, JsonFileStorage};
use pool_routes::handlers;
use pool_routes::services::geocoding::{AnchorGeocoder, Geocoder};
use pool_routes::services::route_store::{RepositoryDeps, RouteRepository};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    std::fs::create_dir_all(&config.logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &config.logs_dir, "pool-routes.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - both stderr and file
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,pool_routes=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!("Configuration loaded: routes at {}", config.routes_file.display());

    let directory = InMemoryDirectory::from_json_file(&config.directory_file)
        .context("failed to load customer directory")?;
    let geocoder = AnchorGeocoder::new();
    info!("Using {} geocoder", geocoder.name());

    let deps = RepositoryDeps {
        directory: Arc::new(directory),
        geocoder: Arc::new(geocoder),
        storage: Arc::new(JsonFileStorage::new(&config.routes_file)),
        rates: config.rates,
    };

    let today = chrono::Local::now().date_naive();
    let repo = RouteRepository::open(deps, today).context("failed to open route store")?;

    let command = cli.command.unwrap_or(Command::Show { technician: None });
    let mut stdout = std::io::stdout().lock();
    handlers::dispatch(command, &repo, today, &mut stdout)
}
