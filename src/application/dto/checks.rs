use serde::{Deserialize, Serialize};

use crate::domain::services::{FrenzyCheck, RemorseCheck, RouseCheck};
use crate::domain::value_objects::DieFace;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouseCheckRequestDto {
    /// Roll a second die when the first fails
    #[serde(default)]
    pub reroll: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrenzyCheckRequestDto {
    pub willpower: u8,
    pub humanity: u8,
    #[serde(default)]
    pub difficulty: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemorseCheckRequestDto {
    pub humanity: u8,
    #[serde(default)]
    pub stains: u8,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RouseCheckDto {
    pub dice: Vec<DieFace>,
    pub success: bool,
    pub hunger_increase: u8,
    pub rerolled: bool,
}

impl From<RouseCheck> for RouseCheckDto {
    fn from(check: RouseCheck) -> Self {
        Self {
            dice: check.dice,
            success: check.success,
            hunger_increase: check.hunger_increase,
            rerolled: check.rerolled,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrenzyCheckDto {
    pub pool: u32,
    pub difficulty: u8,
    pub dice: Vec<DieFace>,
    pub successes: u32,
    pub margin: i64,
    pub resisted: bool,
}

impl From<FrenzyCheck> for FrenzyCheckDto {
    fn from(check: FrenzyCheck) -> Self {
        Self {
            margin: check.margin(),
            pool: check.pool,
            difficulty: check.difficulty,
            dice: check.dice,
            successes: check.successes,
            resisted: check.resisted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RemorseCheckDto {
    pub pool: u32,
    pub dice: Vec<DieFace>,
    pub successes: u32,
    pub humanity_lost: bool,
    pub new_humanity: u8,
}

impl From<RemorseCheck> for RemorseCheckDto {
    fn from(check: RemorseCheck) -> Self {
        Self {
            pool: check.pool,
            dice: check.dice,
            successes: check.successes,
            humanity_lost: check.humanity_lost,
            new_humanity: check.new_humanity,
        }
    }
}
