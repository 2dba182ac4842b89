//! V5 special checks: rouse, frenzy, remorse and willpower
//!
//! Most are small fixed-purpose rolls that feed a character resource rather
//! than a scene outcome.

use super::v5_resolver::{roll_v5, V5Tally};
use crate::domain::entities::RollResult;
use crate::domain::value_objects::{DicePool, DieFace};

pub const DEFAULT_FRENZY_DIFFICULTY: u8 = 3;

/// Result of a rouse check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouseCheck {
    pub dice: Vec<DieFace>,
    /// True when hunger does not rise
    pub success: bool,
    pub hunger_increase: u8,
    pub rerolled: bool,
}

/// Roll one die, succeeding on 6 or more.
///
/// When a reroll applies and the first die fails, a second die is drawn and
/// decides the check.
pub fn rouse_check(reroll: bool, mut draw: impl FnMut() -> DieFace) -> RouseCheck {
    let mut dice = vec![draw()];
    if reroll && !dice[0].is_v5_success() {
        dice.push(draw());
    }
    let success = dice.last().is_some_and(|face| face.is_v5_success());
    RouseCheck {
        rerolled: dice.len() > 1,
        dice,
        success,
        hunger_increase: if success { 0 } else { 1 },
    }
}

/// Result of a frenzy check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrenzyCheck {
    pub pool: u32,
    pub difficulty: u8,
    pub dice: Vec<DieFace>,
    pub successes: u32,
    pub resisted: bool,
}

impl FrenzyCheck {
    pub fn margin(&self) -> i64 {
        i64::from(self.successes) - i64::from(self.difficulty)
    }
}

/// Willpower plus a third of humanity, no hunger dice
pub fn frenzy_pool(willpower: u8, humanity: u8) -> u32 {
    u32::from(willpower) + u32::from(humanity) / 3
}

pub fn frenzy_check(
    willpower: u8,
    humanity: u8,
    difficulty: u8,
    mut draw: impl FnMut() -> DieFace,
) -> FrenzyCheck {
    let pool = frenzy_pool(willpower, humanity);
    let difficulty = difficulty.max(1);
    let dice: Vec<DieFace> = (0..pool).map(|_| draw()).collect();
    let outcome = V5Tally::from_dice(&dice, &[]).classify(difficulty);
    FrenzyCheck {
        pool,
        difficulty,
        dice,
        successes: outcome.successes,
        resisted: outcome.is_success,
    }
}

/// Result of a remorse check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemorseCheck {
    pub pool: u32,
    pub dice: Vec<DieFace>,
    pub successes: u32,
    pub humanity_lost: bool,
    pub new_humanity: u8,
}

/// Humanity less stains, never fewer than one die
pub fn remorse_pool(humanity: u8, stains: u8) -> u32 {
    u32::from(humanity.saturating_sub(stains).max(1))
}

/// A single success keeps humanity; otherwise one point is lost
pub fn remorse_check(
    humanity: u8,
    stains: u8,
    mut draw: impl FnMut() -> DieFace,
) -> RemorseCheck {
    let pool = remorse_pool(humanity, stains);
    let dice: Vec<DieFace> = (0..pool).map(|_| draw()).collect();
    let outcome = V5Tally::from_dice(&dice, &[]).classify(1);
    let humanity_lost = !outcome.is_success;
    RemorseCheck {
        pool,
        dice,
        successes: outcome.successes,
        humanity_lost,
        new_humanity: if humanity_lost {
            humanity.saturating_sub(1)
        } else {
            humanity
        },
    }
}

/// Plain willpower roll: one regular die per willpower point, no hunger
pub fn willpower_roll(
    willpower: u8,
    difficulty: u8,
    draw: impl FnMut() -> DieFace,
) -> RollResult {
    roll_v5(DicePool::plain(u32::from(willpower)), difficulty, draw)
}
