//! V20 resolution - target numbers, ones cancelling successes, botches

use crate::domain::entities::{RollResult, V20Outcome};
use crate::domain::value_objects::{DicePool, DieFace, RuleSetConfig};

/// Raw counts a V20 classification is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct V20Tally {
    /// Dice meeting the target number
    pub hits: u32,
    pub ones: u32,
    pub tens: u32,
    /// Automatic success from a spent willpower point
    pub willpower: bool,
}

impl V20Tally {
    pub fn from_dice(dice: &[DieFace], target_number: u8) -> Self {
        dice.iter().fold(Self::default(), |mut tally, face| {
            if face.value() >= target_number {
                tally.hits += 1;
            }
            if face.is_one() {
                tally.ones += 1;
            }
            if face.is_ten() {
                tally.tens += 1;
            }
            tally
        })
    }

    pub fn with_willpower(self, willpower: bool) -> Self {
        Self { willpower, ..self }
    }

    /// Hits plus any automatic success, minus ones; may go negative
    pub fn raw_successes(&self) -> i64 {
        i64::from(self.hits) + i64::from(self.willpower) - i64::from(self.ones)
    }

    /// An automatic success rules out a botch
    pub fn classify(&self) -> V20Outcome {
        let raw = self.raw_successes();
        let successes = u32::try_from(raw.max(0)).unwrap_or(0);
        V20Outcome {
            successes,
            is_success: successes >= 1,
            is_botch: raw <= 0 && self.ones > 0 && !self.willpower,
            willpower: self.willpower,
        }
    }
}

pub fn classify_v20(dice: &[DieFace], target_number: u8, willpower: bool) -> V20Outcome {
    V20Tally::from_dice(dice, target_number)
        .with_willpower(willpower)
        .classify()
}

/// Draw the dice of a V20 pool
///
/// With a specialty every ten among the initial draws adds one extra die.
/// Extra dice never explode themselves, so at most twice the pool is drawn.
pub fn draw_v20(
    total_dice: u32,
    specialty: bool,
    mut draw: impl FnMut() -> DieFace,
) -> Vec<DieFace> {
    let mut dice: Vec<DieFace> = (0..total_dice).map(|_| draw()).collect();
    if specialty {
        let explosions = dice.iter().filter(|face| face.is_ten()).count();
        dice.extend((0..explosions).map(|_| draw()));
    }
    dice
}

/// Draw and classify a V20 roll
pub fn roll_v20(
    pool: DicePool,
    target_number: u8,
    specialty: bool,
    willpower: bool,
    draw: impl FnMut() -> DieFace,
) -> RollResult {
    let pool = DicePool::plain(pool.total_dice());
    let config = RuleSetConfig::v20(target_number, specialty);
    let dice = draw_v20(pool.total_dice(), config.specialty_explosion, draw);
    let outcome = classify_v20(&dice, config.target_number(), willpower);
    RollResult::v20(pool, config, dice, outcome)
}

/// Accumulated result of an extended V20 roll
#[derive(Debug, Clone)]
pub struct ExtendedRoll {
    pub rolls: Vec<RollResult>,
    pub goal: u32,
    pub total_successes: u32,
    pub botched: bool,
}

impl ExtendedRoll {
    pub fn is_success(&self) -> bool {
        !self.botched && self.total_successes >= self.goal
    }
}

pub const DEFAULT_EXTENDED_MAX_ROLLS: u32 = 10;

/// Roll the same pool repeatedly until the goal is reached
///
/// A botch ends the attempt and its successes are not added. At least one
/// roll is always made.
pub fn extended_v20(
    pool: DicePool,
    target_number: u8,
    specialty: bool,
    goal: u32,
    max_rolls: u32,
    mut draw: impl FnMut() -> DieFace,
) -> ExtendedRoll {
    let mut extended = ExtendedRoll {
        rolls: Vec::new(),
        goal,
        total_successes: 0,
        botched: false,
    };
    for _ in 0..max_rolls.max(1) {
        let roll = roll_v20(pool, target_number, specialty, false, &mut draw);
        let outcome = roll.v20_outcome().copied().unwrap_or_default();
        extended.rolls.push(roll);
        if outcome.is_botch {
            extended.botched = true;
            break;
        }
        extended.total_successes += outcome.successes;
        if extended.total_successes >= goal {
            break;
        }
    }
    extended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RollResolution;

    fn faces(values: &[u8]) -> Vec<DieFace> {
        values.iter().map(|v| DieFace::new(*v).unwrap()).collect()
    }

    fn scripted(values: &[u8]) -> impl FnMut() -> DieFace {
        let mut faces = faces(values).into_iter();
        move || faces.next().expect("script exhausted")
    }

    fn result_dice(result: &RollResult) -> &[DieFace] {
        match result.resolution() {
            RollResolution::V20 { dice, .. } => dice,
            RollResolution::V5 { .. } => &[],
        }
    }

    #[test]
    fn test_botch_scenario() {
        let result = roll_v20(DicePool::plain(3), 6, false, false, scripted(&[1, 1, 3]));
        let outcome = result.v20_outcome().unwrap();

        assert_eq!(V20Tally::from_dice(result_dice(&result), 6).raw_successes(), -2);
        assert_eq!(outcome.successes, 0);
        assert!(!outcome.is_success);
        assert!(outcome.is_botch);
    }

    #[test]
    fn test_ones_cancel_successes() {
        let outcome = classify_v20(&faces(&[7, 8, 1]), 6, false);
        assert_eq!(outcome.successes, 1);
        assert!(outcome.is_success);
        assert!(!outcome.is_botch);
    }

    #[test]
    fn test_cancelled_to_zero_with_one_is_botch() {
        let outcome = classify_v20(&faces(&[9, 1]), 6, false);
        assert_eq!(outcome.successes, 0);
        assert!(outcome.is_botch);
    }

    #[test]
    fn test_plain_failure_is_not_botch() {
        let outcome = classify_v20(&faces(&[2, 3, 5]), 6, false);
        assert_eq!(outcome.successes, 0);
        assert!(!outcome.is_success);
        assert!(!outcome.is_botch);
    }

    #[test]
    fn test_target_number_is_respected() {
        let outcome = classify_v20(&faces(&[7, 8, 9]), 8, false);
        assert_eq!(outcome.successes, 2);
    }

    #[test]
    fn test_specialty_explodes_once() {
        // Both tens explode; the exploded ten does not
        let dice = draw_v20(3, true, scripted(&[10, 4, 10, 10, 2]));
        assert_eq!(dice, faces(&[10, 4, 10, 10, 2]));

        let outcome = classify_v20(&dice, 6, false);
        assert_eq!(outcome.successes, 3);
    }

    #[test]
    fn test_without_specialty_tens_do_not_explode() {
        let dice = draw_v20(2, false, scripted(&[10, 10]));
        assert_eq!(dice.len(), 2);
    }

    #[test]
    fn test_explosion_bounded_by_twice_pool() {
        let dice = draw_v20(4, true, || DieFace::TEN);
        assert_eq!(dice.len(), 8);
    }

    #[test]
    fn test_roll_ignores_hunger_and_clamps_target() {
        let result = roll_v20(DicePool::new(2, 2), 1, false, false, scripted(&[2, 5]));
        assert_eq!(result.pool().special_dice(), 0);
        assert_eq!(result.config().target_number(), 2);
        assert_eq!(result.successes(), 2);
    }

    #[test]
    fn test_successes_never_negative() {
        for a in 1..=10u8 {
            for b in 1..=10u8 {
                for target in 2..=10u8 {
                    let dice = faces(&[a, b, 1]);
                    let outcome = classify_v20(&dice, target, false);
                    let tally = V20Tally::from_dice(&dice, target);
                    assert_eq!(i64::from(outcome.successes), tally.raw_successes().max(0));
                    assert_eq!(outcome.is_success, outcome.successes >= 1);
                }
            }
        }
    }

    #[test]
    fn test_willpower_adds_success_and_prevents_botch() {
        let dice = faces(&[1, 3]);
        assert!(classify_v20(&dice, 6, false).is_botch);

        let spent = classify_v20(&dice, 6, true);
        assert_eq!(spent.successes, 0);
        assert!(!spent.is_botch);
        assert!(spent.willpower);

        let boosted = classify_v20(&faces(&[7, 2]), 6, true);
        assert_eq!(boosted.successes, 2);

        let result = roll_v20(DicePool::plain(1), 6, false, true, scripted(&[4]));
        assert_eq!(result.successes(), 1);
        assert!(result.v20_outcome().unwrap().willpower);
    }

    #[test]
    fn test_extended_roll_accumulates_until_goal() {
        let extended = extended_v20(
            DicePool::plain(2),
            6,
            false,
            3,
            DEFAULT_EXTENDED_MAX_ROLLS,
            scripted(&[7, 2, 8, 9]),
        );
        assert_eq!(extended.rolls.len(), 2);
        assert_eq!(extended.total_successes, 3);
        assert!(extended.is_success());
        assert!(!extended.botched);
    }

    #[test]
    fn test_extended_roll_stops_on_botch() {
        let extended = extended_v20(DicePool::plain(2), 6, false, 5, 4, scripted(&[7, 8, 1, 3]));
        assert_eq!(extended.rolls.len(), 2);
        assert_eq!(extended.total_successes, 2);
        assert!(extended.botched);
        assert!(!extended.is_success());
    }

    #[test]
    fn test_extended_roll_respects_max_rolls() {
        let extended = extended_v20(DicePool::plain(1), 6, false, 10, 3, || DieFace::TEN);
        assert_eq!(extended.rolls.len(), 3);
        assert_eq!(extended.total_successes, 3);
        assert!(!extended.is_success());

        let once = extended_v20(DicePool::plain(1), 6, false, 0, 0, scripted(&[2]));
        assert_eq!(once.rolls.len(), 1);
        assert!(once.is_success());
    }
}
