//! Configuration management

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::defaults::{DEFAULT_FUEL_COST_PER_MILE, DEFAULT_MINUTES_PER_MILE};
use crate::services::savings::SavingsRates;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Route document (JSON)
    pub routes_file: PathBuf,

    /// Customer/technician directory (JSON)
    pub directory_file: PathBuf,

    /// Directory for rolling log files
    pub logs_dir: PathBuf,

    pub rates: SavingsRates,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let routes_file = std::env::var("ROUTES_FILE")
            .unwrap_or_else(|_| "data/routes.json".to_string())
            .into();

        let directory_file = std::env::var("DIRECTORY_FILE")
            .unwrap_or_else(|_| "demos/directory.json".to_string())
            .into();

        let logs_dir = std::env::var("LOGS_DIR")
            .unwrap_or_else(|_| "logs".to_string())
            .into();

        let rates = SavingsRates {
            minutes_per_mile: rate_from_env("MINUTES_PER_MILE", DEFAULT_MINUTES_PER_MILE)?,
            fuel_cost_per_mile: rate_from_env("FUEL_COST_PER_MILE", DEFAULT_FUEL_COST_PER_MILE)?,
        };

        Ok(Self {
            routes_file,
            directory_file,
            logs_dir,
            rates,
        })
    }
}

fn rate_from_env(key: &str, default: f64) -> Result<f64> {
    match std::env::var(key) {
        Ok(raw) => parse_rate(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_rate(key: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a number (got {:?})", key, raw))?;
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("{} must be a non-negative number (got {})", key, value);
    }
    Ok(value)
}
