//! Application configuration

use std::env;

use anyhow::{Context, Result};

use crate::domain::aggregates::DEFAULT_HISTORY_CAPACITY;
use crate::domain::value_objects::RollSettings;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,

    /// Most results kept in the roll history
    pub history_capacity: usize,

    /// Seed for a reproducible dice sequence; thread RNG when unset
    pub rng_seed: Option<u64>,

    /// Starting roll settings
    pub roll_defaults: RollSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let history_capacity: usize = env::var("HISTORY_CAPACITY")
            .unwrap_or_else(|_| DEFAULT_HISTORY_CAPACITY.to_string())
            .parse()
            .context("HISTORY_CAPACITY must be a positive integer")?;

        let rng_seed = env::var("RNG_SEED")
            .ok()
            .map(|seed| seed.parse::<u64>())
            .transpose()
            .context("RNG_SEED must be an unsigned 64-bit integer")?;

        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            history_capacity: history_capacity.max(1),
            rng_seed,
            roll_defaults: RollSettings::from_env(),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3000,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            rng_seed: None,
            roll_defaults: RollSettings::default(),
        }
    }
}
