//! Server configuration loaded from environment variables.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use ladder_core::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_POPULATION, DEFAULT_PORT, DEFAULT_TICK_INTERVAL_SECS,
    DEFAULT_TOP_N,
};

#[derive(Clone, Debug)]
pub struct Config {
    /// Host part of the listen address.
    pub bind_host: String,
    /// TCP port (`PORT`).
    pub port: u16,
    /// Entities seeded at startup.
    pub population: usize,
    /// Score mutations per tick.
    pub batch_size: usize,
    /// Seconds between ticks.
    pub tick_secs: u64,
    /// Standings served by `/leaderboard`.
    pub top_n: usize,
    /// Log level filter string (e.g. "info", "debug", "ladder_core=trace").
    pub log_level: String,
    /// Log output format: "text" or "json".
    pub log_format: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_host = lookup("LADDER_BIND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port: u16 = lookup("PORT")
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("PORT must be a valid TCP port")?
            .unwrap_or(DEFAULT_PORT);

        let population: usize = parse_or(&lookup, "LADDER_POPULATION", DEFAULT_POPULATION)?;
        if population == 0 {
            bail!("LADDER_POPULATION must be at least 1");
        }

        let batch_size: usize = parse_or(&lookup, "LADDER_BATCH_SIZE", DEFAULT_BATCH_SIZE)?;

        let tick_secs: u64 = parse_or(&lookup, "LADDER_TICK_SECS", DEFAULT_TICK_INTERVAL_SECS)?;
        if tick_secs == 0 {
            bail!("LADDER_TICK_SECS must be a positive integer");
        }

        let top_n: usize = parse_or(&lookup, "LADDER_TOP_N", DEFAULT_TOP_N)?;

        let log_level = lookup("LADDER_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = lookup("LADDER_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        Ok(Config {
            bind_host,
            port,
            population,
            batch_size,
            tick_secs,
            top_n,
            log_level,
            log_format,
        })
    }

    /// Socket address string to bind the HTTP server to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
        None => Ok(default),
    }
}
