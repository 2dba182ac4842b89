//! Opposed rolls - two pools rolled against each other

use serde::{Deserialize, Serialize};

use super::v20_resolver::roll_v20;
use super::v5_resolver::roll_v5;
use crate::domain::entities::RollResult;
use crate::domain::value_objects::{DicePool, DieFace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestWinner {
    Attacker,
    Defender,
    Tie,
}

/// Both sides of an opposed roll
#[derive(Debug, Clone)]
pub struct ContestedRoll {
    pub attacker: RollResult,
    pub defender: RollResult,
    pub winner: ContestWinner,
    /// Difference in successes, always non-negative
    pub margin: u32,
}

impl ContestedRoll {
    fn decide(attacker: RollResult, defender: RollResult) -> Self {
        let (a, d) = (attacker.successes(), defender.successes());
        let winner = match a.cmp(&d) {
            std::cmp::Ordering::Greater => ContestWinner::Attacker,
            std::cmp::Ordering::Less => ContestWinner::Defender,
            std::cmp::Ordering::Equal => ContestWinner::Tie,
        };
        Self {
            attacker,
            defender,
            winner,
            margin: a.abs_diff(d),
        }
    }
}

/// V5 contest: both pools roll at difficulty 1, most successes wins.
/// The attacker's dice are drawn first.
pub fn contested_v5(
    attacker: DicePool,
    defender: DicePool,
    mut draw: impl FnMut() -> DieFace,
) -> ContestedRoll {
    let attacker = roll_v5(attacker, 1, &mut draw);
    let defender = roll_v5(defender, 1, &mut draw);
    ContestedRoll::decide(attacker, defender)
}

/// V20 resisted roll at a shared target number
pub fn resisted_v20(
    attacker: DicePool,
    defender: DicePool,
    target_number: u8,
    specialties: (bool, bool),
    mut draw: impl FnMut() -> DieFace,
) -> ContestedRoll {
    let (attacker_specialty, defender_specialty) = specialties;
    let attacker = roll_v20(attacker, target_number, attacker_specialty, false, &mut draw);
    let defender = roll_v20(defender, target_number, defender_specialty, false, &mut draw);
    ContestedRoll::decide(attacker, defender)
}
