//! Shared application state

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::application::ports::outbound::RandomPort;
use crate::application::services::DiceService;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::random::{SeededRngAdapter, ThreadRngAdapter};

/// Shared application state
pub struct AppState {
    /// Settings and history behind one lock; handlers hold it for a single call
    pub dice: RwLock<DiceService>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let rng: Arc<dyn RandomPort> = match config.rng_seed {
            Some(seed) => {
                info!(seed, "Using seeded dice generator");
                Arc::new(SeededRngAdapter::new(seed))
            }
            None => Arc::new(ThreadRngAdapter::new()),
        };
        Self::with_random_port(config, rng)
    }

    /// State over a caller-supplied random port
    pub fn with_random_port(config: &AppConfig, rng: Arc<dyn RandomPort>) -> Self {
        let dice = DiceService::new(rng, config.history_capacity, config.roll_defaults.clone());
        Self {
            dice: RwLock::new(dice),
        }
    }
}
