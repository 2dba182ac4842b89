use serde::{Deserialize, Serialize};

use super::dice::RollResultDto;
use crate::application::services::{ContestedV5Request, ExtendedV20Request, ResistedV20Request};
use crate::domain::services::{ContestWinner, ContestedRoll, ExtendedRoll};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct WillpowerRollRequestDto {
    pub willpower: u8,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContestedV5RequestDto {
    pub attacker_pool: u32,
    #[serde(default)]
    pub attacker_hunger: u32,
    pub defender_pool: u32,
    #[serde(default)]
    pub defender_hunger: u32,
}

impl From<ContestedV5RequestDto> for ContestedV5Request {
    fn from(value: ContestedV5RequestDto) -> Self {
        Self {
            attacker_pool: value.attacker_pool,
            attacker_hunger: value.attacker_hunger,
            defender_pool: value.defender_pool,
            defender_hunger: value.defender_hunger,
        }
    }
}

/// `difficulty` is the shared target number
#[derive(Debug, Clone, Deserialize)]
pub struct ResistedV20RequestDto {
    pub attacker_pool: u32,
    pub defender_pool: u32,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub attacker_specialty: bool,
    #[serde(default)]
    pub defender_specialty: bool,
}

impl From<ResistedV20RequestDto> for ResistedV20Request {
    fn from(value: ResistedV20RequestDto) -> Self {
        Self {
            attacker_pool: value.attacker_pool,
            defender_pool: value.defender_pool,
            target_number: value.difficulty,
            attacker_specialty: value.attacker_specialty,
            defender_specialty: value.defender_specialty,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtendedV20RequestDto {
    pub pool: u32,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub specialty: bool,
    pub target_successes: u32,
    #[serde(default)]
    pub max_rolls: Option<u32>,
}

impl From<ExtendedV20RequestDto> for ExtendedV20Request {
    fn from(value: ExtendedV20RequestDto) -> Self {
        Self {
            pool: value.pool,
            target_number: value.difficulty,
            specialty: value.specialty,
            goal: value.target_successes,
            max_rolls: value.max_rolls,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ContestedRollDto {
    pub attacker: RollResultDto,
    pub defender: RollResultDto,
    pub winner: ContestWinner,
    pub margin: u32,
}

impl From<ContestedRoll> for ContestedRollDto {
    fn from(contest: ContestedRoll) -> Self {
        Self {
            attacker: RollResultDto::from(&contest.attacker),
            defender: RollResultDto::from(&contest.defender),
            winner: contest.winner,
            margin: contest.margin,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtendedRollDto {
    pub rolls: Vec<RollResultDto>,
    pub total_successes: u32,
    pub target_successes: u32,
    pub success: bool,
    pub botched: bool,
    pub rolls_taken: usize,
}

impl From<ExtendedRoll> for ExtendedRollDto {
    fn from(extended: ExtendedRoll) -> Self {
        Self {
            success: extended.is_success(),
            rolls_taken: extended.rolls.len(),
            rolls: extended.rolls.iter().map(RollResultDto::from).collect(),
            total_successes: extended.total_successes,
            target_successes: extended.goal,
            botched: extended.botched,
        }
    }
}
