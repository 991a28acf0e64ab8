//! ladder-server — live leaderboard over HTTP.
//!
//! Seeds a fixed population of scored users, mutates a random batch of
//! scores every few seconds, and serves the top-N and substring search
//! against the current ranking.

use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::{Context, Result};
use ladder_core::constants::DEFAULT_SCORE_RANGE;
use ladder_core::RankingEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};

mod config;
mod driver;
mod routes;

use config::Config;

/// Shared application state passed to every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// The leaderboard, shared with the mutation driver.
    pub engine: Arc<RankingEngine>,
    /// Server configuration.
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load server configuration")?;

    init_logging(&config.log_level, &config.log_format);

    info!(
        bind = %config.bind_addr(),
        population = config.population,
        batch_size = config.batch_size,
        tick_secs = config.tick_secs,
        top_n = config.top_n,
        "Starting ladder-server"
    );

    let engine = Arc::new(RankingEngine::new());
    engine
        .initialize(
            config.population,
            DEFAULT_SCORE_RANGE,
            &mut StdRng::from_entropy(),
        )
        .context("Failed to seed the leaderboard")?;

    let driver = driver::spawn_driver(
        Arc::clone(&engine),
        config.tick_interval(),
        config.batch_size,
    );

    let state = AppState {
        engine,
        config: Arc::new(config.clone()),
    };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr()))?;

    info!("Listening on http://{}", config.bind_addr());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down...");
    };

    tokio::select! {
        served = axum::serve(listener, app).with_graceful_shutdown(shutdown).into_future() => {
            served.context("HTTP server error")?;
        }
        finished = driver => {
            let outcome = finished.context("mutation driver panicked")?;
            outcome.context("mutation driver stopped")?;
        }
    }

    info!("ladder-server shutdown complete");
    Ok(())
}

/// Initialize tracing. `RUST_LOG` wins over the configured level.
///
/// `format = "json"` switches to structured JSON output; anything else is
/// human-readable text.
fn init_logging(level: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
