//! V5 resolution - hunger dice, pairs of tens, messy criticals and bestial failures

use crate::domain::entities::{RollResult, V5Outcome};
use crate::domain::value_objects::{DicePool, DieCategory, DieFace, RuleSetConfig};

/// Bonus successes granted by each pair of tens
const CRITICAL_PAIR_BONUS: u32 = 2;

/// Raw counts a V5 classification is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct V5Tally {
    /// Dice showing 6 or more, both categories
    pub raw_successes: u32,
    pub regular_tens: u32,
    pub hunger_tens: u32,
    pub hunger_ones: u32,
}

impl V5Tally {
    pub fn from_dice(regular_dice: &[DieFace], hunger_dice: &[DieFace]) -> Self {
        let categorized = regular_dice
            .iter()
            .map(|face| (DieCategory::Regular, *face))
            .chain(hunger_dice.iter().map(|face| (DieCategory::Special, *face)));

        let mut tally = Self::default();
        for (category, face) in categorized {
            if face.is_v5_success() {
                tally.raw_successes += 1;
            }
            match category {
                DieCategory::Regular if face.is_ten() => tally.regular_tens += 1,
                DieCategory::Special if face.is_ten() => tally.hunger_tens += 1,
                DieCategory::Special if face.is_one() => tally.hunger_ones += 1,
                _ => {}
            }
        }
        tally
    }

    pub fn critical_pairs(&self) -> u32 {
        (self.regular_tens + self.hunger_tens) / 2
    }

    pub fn successes(&self) -> u32 {
        self.raw_successes + CRITICAL_PAIR_BONUS * self.critical_pairs()
    }

    /// Classify against a difficulty
    ///
    /// A critical is messy when any hunger die shows a ten, whichever dice
    /// ended up paired.
    pub fn classify(&self, difficulty: u8) -> V5Outcome {
        let successes = self.successes();
        let is_success = successes >= u32::from(difficulty);
        let is_critical = self.critical_pairs() > 0 && is_success;
        V5Outcome {
            successes,
            is_success,
            is_critical,
            is_messy_critical: is_critical && self.hunger_tens > 0,
            is_bestial_failure: !is_success && self.hunger_ones > 0,
        }
    }
}

/// Classify a full V5 die set
pub fn classify_v5(
    regular_dice: &[DieFace],
    hunger_dice: &[DieFace],
    difficulty: u8,
) -> V5Outcome {
    V5Tally::from_dice(regular_dice, hunger_dice).classify(difficulty)
}

/// Draw and classify a V5 roll
///
/// Regular dice are drawn first, then hunger dice.
pub fn roll_v5(
    pool: DicePool,
    difficulty: u8,
    mut draw: impl FnMut() -> DieFace,
) -> RollResult {
    let config = RuleSetConfig::v5(difficulty);
    let regular_dice: Vec<DieFace> = (0..pool.regular_dice()).map(|_| draw()).collect();
    let hunger_dice: Vec<DieFace> = (0..pool.special_dice()).map(|_| draw()).collect();
    let outcome = classify_v5(&regular_dice, &hunger_dice, config.difficulty());
    RollResult::v5(pool, config, regular_dice, hunger_dice, outcome)
}
