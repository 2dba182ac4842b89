//! Roll settings value object
//!
//! The defaults the roller remembers between rolls. Requests that omit a
//! field fall back to these values.

use serde::{Deserialize, Serialize};

use super::rule_system::{
    RuleSetVariant, DEFAULT_V20_TARGET, DEFAULT_V5_DIFFICULTY, MAX_V20_TARGET, MIN_V20_TARGET,
};

pub const MAX_POOL: u32 = 30;
pub const MAX_HUNGER: u32 = 5;
pub const MAX_V5_DIFFICULTY: u8 = 10;

/// Remembered roll configuration, every field kept inside its legal range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RollSettings {
    pub variant: RuleSetVariant,

    // V5
    pub pool: u32,
    pub hunger: u32,
    pub difficulty: u8,

    // V20
    pub dice_pool: u32,
    pub target_number: u8,
    pub specialty: bool,
}

impl Default for RollSettings {
    fn default() -> Self {
        Self {
            variant: RuleSetVariant::V5,
            pool: 5,
            hunger: 1,
            difficulty: DEFAULT_V5_DIFFICULTY,
            dice_pool: 5,
            target_number: DEFAULT_V20_TARGET,
            specialty: false,
        }
    }
}

impl RollSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let variant = match std::env::var("NIGHTROLL_DEFAULT_VARIANT").as_deref() {
            Ok("v20") | Ok("V20") => RuleSetVariant::V20,
            Ok("v5") | Ok("V5") => RuleSetVariant::V5,
            _ => defaults.variant,
        };
        Self {
            variant,
            pool: env_or("NIGHTROLL_DEFAULT_POOL", defaults.pool),
            hunger: env_or("NIGHTROLL_DEFAULT_HUNGER", defaults.hunger),
            difficulty: env_or("NIGHTROLL_DEFAULT_DIFFICULTY", defaults.difficulty),
            dice_pool: env_or("NIGHTROLL_DEFAULT_V20_POOL", defaults.dice_pool),
            target_number: env_or("NIGHTROLL_DEFAULT_TARGET", defaults.target_number),
            specialty: env_or("NIGHTROLL_DEFAULT_SPECIALTY", defaults.specialty),
        }
        .normalized()
    }

    /// Clamp every field into range
    pub fn normalized(mut self) -> Self {
        self.set_pool(self.pool);
        self.set_hunger(self.hunger);
        self.set_difficulty(self.difficulty);
        self.set_dice_pool(self.dice_pool);
        self.set_target_number(self.target_number);
        self
    }

    pub fn set_pool(&mut self, pool: u32) {
        self.pool = pool.min(MAX_POOL);
    }

    pub fn set_hunger(&mut self, hunger: u32) {
        self.hunger = hunger.min(MAX_HUNGER);
    }

    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.difficulty = difficulty.clamp(DEFAULT_V5_DIFFICULTY, MAX_V5_DIFFICULTY);
    }

    pub fn set_dice_pool(&mut self, dice_pool: u32) {
        self.dice_pool = dice_pool.clamp(1, MAX_POOL);
    }

    pub fn set_target_number(&mut self, target_number: u8) {
        self.target_number = target_number.clamp(MIN_V20_TARGET, MAX_V20_TARGET);
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
