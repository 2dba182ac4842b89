//! Rule set configuration for the two supported dice systems

use serde::{Deserialize, Serialize};

/// Default V5 difficulty (required successes)
pub const DEFAULT_V5_DIFFICULTY: u8 = 1;
/// Default V20 target number
pub const DEFAULT_V20_TARGET: u8 = 6;
pub const MIN_V20_TARGET: u8 = 2;
pub const MAX_V20_TARGET: u8 = 10;

/// The dice system a roll is resolved under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSetVariant {
    /// Vampire 5th edition: hunger dice, pairs of tens
    #[default]
    V5,
    /// Vampire 20th anniversary: target number, botches
    V20,
}

impl RuleSetVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V5 => "v5",
            Self::V20 => "v20",
        }
    }
}

impl std::fmt::Display for RuleSetVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a pool is resolved
///
/// `threshold` is the difficulty (successes needed) under V5 and the target
/// number a single die must reach under V20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    pub variant: RuleSetVariant,
    pub threshold: u8,
    /// V20 only: tens explode once
    pub specialty_explosion: bool,
}

impl RuleSetConfig {
    /// V5 configuration; a difficulty of zero is treated as unset
    pub fn v5(difficulty: u8) -> Self {
        Self {
            variant: RuleSetVariant::V5,
            threshold: difficulty.max(DEFAULT_V5_DIFFICULTY),
            specialty_explosion: false,
        }
    }

    /// V20 configuration with the target number clamped to 2..=10
    pub fn v20(target_number: u8, specialty: bool) -> Self {
        Self {
            variant: RuleSetVariant::V20,
            threshold: target_number.clamp(MIN_V20_TARGET, MAX_V20_TARGET),
            specialty_explosion: specialty,
        }
    }

    pub fn difficulty(&self) -> u8 {
        self.threshold
    }

    pub fn target_number(&self) -> u8 {
        self.threshold
    }
}

impl Default for RuleSetConfig {
    fn default() -> Self {
        Self::v5(DEFAULT_V5_DIFFICULTY)
    }
}
