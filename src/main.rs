//! Tapgrind - Entry Point
//!
//! Validates the proxy pool, loads the account roster, and runs the account
//! loop until interrupted.

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod config;
mod error;
mod game;
mod models;
mod pool;
mod repository;
mod runner;

use config::Config;
use error::BotError;
use pool::{HttpProber, ProxyPool};
use runner::Runner;

#[tokio::main]
async fn main() -> error::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tapgrind=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tapgrind");

    // Load configuration
    let config = Arc::new(Config::from_env()?);
    info!("Configuration loaded");

    // Load and validate the proxy pool
    let records = repository::load_proxies(&config.files.proxies)?;
    if records.is_empty() {
        error!("No usable proxies in {}", config.files.proxies);
        return Err(BotError::InvalidConfig(format!(
            "{} contains no usable proxies",
            config.files.proxies
        )));
    }

    let pool = Arc::new(ProxyPool::new(records));
    let prober = HttpProber::new(&config.pool);
    pool.validate_all(&prober).await;

    if pool.available_count() == 0 {
        error!("No proxies passed the liveness probe");
        return Err(BotError::InvalidConfig(
            "no proxies passed the liveness probe".into(),
        ));
    }

    // Load the account roster
    let credential_lines = repository::load_credential_lines(&config.files.accounts)?;
    let user_agents = repository::load_user_agents(&config.files.user_agents)?;
    let accounts = repository::pair_with_accounts(credential_lines, user_agents)?;

    if accounts.is_empty() {
        error!("No parsable accounts in {}", config.files.accounts);
        return Err(BotError::InvalidConfig(format!(
            "{} contains no parsable accounts",
            config.files.accounts
        )));
    }

    info!(
        "Loaded {} accounts, {} proxies usable",
        accounts.len(),
        pool.available_count()
    );

    // Run until interrupted
    let runner = Runner::new(Arc::clone(&config), pool, accounts);

    tokio::select! {
        _ = runner.run() => {}
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Tapgrind stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
