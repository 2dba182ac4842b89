use serde::{Deserialize, Serialize};

use crate::application::services::{
    ConfirmOutcome, RerollReport, RerollRequest, V20RollRequest, V5RollRequest,
};
use crate::domain::entities::{
    RerollState, RollResolution, RollResult, V20Outcome, V20ResultType, V5Outcome, V5ResultType,
};
use crate::domain::services::{V20Tally, V5Tally};
use crate::domain::value_objects::{DicePool, DieFace, RollId, RuleSetConfig};

/// Target numbers an ingested V20 roll may carry
const V20_MIN_TARGET: u8 = 2;
const V20_MAX_TARGET: u8 = 10;

// ============================================================================
// Roll requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct V5RollRequestDto {
    pub pool: Option<u32>,
    pub hunger: Option<u32>,
    pub difficulty: Option<u8>,
    pub description: Option<String>,
}

impl From<V5RollRequestDto> for V5RollRequest {
    fn from(value: V5RollRequestDto) -> Self {
        Self {
            pool: value.pool,
            hunger: value.hunger,
            difficulty: value.difficulty,
            description: value.description,
        }
    }
}

/// `difficulty` is the target number each die must meet
#[derive(Debug, Clone, Default, Deserialize)]
pub struct V20RollRequestDto {
    pub pool: Option<u32>,
    pub difficulty: Option<u8>,
    pub specialty: Option<bool>,
    #[serde(default)]
    pub willpower: bool,
    pub description: Option<String>,
}

impl From<V20RollRequestDto> for V20RollRequest {
    fn from(value: V20RollRequestDto) -> Self {
        Self {
            pool: value.pool,
            target_number: value.difficulty,
            specialty: value.specialty,
            willpower: value.willpower,
            description: value.description,
        }
    }
}

/// Roll with the remembered settings under the active rule set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RollRequestDto {
    pub description: Option<String>,
}

// ============================================================================
// Externally resolved rolls
// ============================================================================

/// Ingested roll whose dice do not fit the pool it declares
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRollInput {
    #[error("pool {pool} (hunger {hunger}) got {regular_dice} regular, {hunger_dice} hunger dice")]
    V5DiceMismatch {
        pool: u32,
        hunger: u32,
        regular_dice: usize,
        hunger_dice: usize,
    },
    #[error("pool of {pool} needs {expected} dice, got {actual}")]
    V20DiceMismatch {
        pool: u32,
        expected: usize,
        actual: usize,
    },
    #[error("target number {0} is outside 2..=10")]
    V20TargetOutOfRange(u8),
}

/// A V5 roll resolved by another authority
///
/// The outcome flags are taken as given, but the dice must fill the declared
/// pool after hunger is clamped to it.
#[derive(Debug, Clone, Deserialize)]
pub struct V5RollInput {
    #[serde(default)]
    pub id: Option<RollId>,
    pub pool: u32,
    pub hunger: u32,
    pub difficulty: u8,
    pub regular_dice: Vec<DieFace>,
    pub hunger_dice: Vec<DieFace>,
    pub successes: u32,
    pub is_success: bool,
    pub is_critical: bool,
    pub is_messy_critical: bool,
    pub is_bestial_failure: bool,
    #[serde(default)]
    pub willpower_rerolled: bool,
    #[serde(default)]
    pub rerolled_indices: Vec<usize>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<V5RollInput> for RollResult {
    type Error = InvalidRollInput;

    fn try_from(value: V5RollInput) -> Result<Self, Self::Error> {
        let pool = DicePool::new(value.pool, value.hunger);
        if value.regular_dice.len() != pool.regular_dice() as usize
            || value.hunger_dice.len() != pool.special_dice() as usize
        {
            return Err(InvalidRollInput::V5DiceMismatch {
                pool: pool.total_dice(),
                hunger: pool.special_dice(),
                regular_dice: value.regular_dice.len(),
                hunger_dice: value.hunger_dice.len(),
            });
        }
        let outcome = V5Outcome {
            successes: value.successes,
            is_success: value.is_success,
            is_critical: value.is_critical,
            is_messy_critical: value.is_messy_critical,
            is_bestial_failure: value.is_bestial_failure,
        };
        let result = RollResult::v5(
            pool,
            RuleSetConfig::v5(value.difficulty),
            value.regular_dice,
            value.hunger_dice,
            outcome,
        )
        .with_reroll_state(RerollState {
            used: value.willpower_rerolled,
            rerolled_indices: value.rerolled_indices,
        });
        Ok(finish_input(result, value.id, value.description))
    }
}

/// A V20 roll resolved by another authority
///
/// The flags are taken as given. The dice must hold the pool plus one extra
/// die per initial ten when a specialty applies.
#[derive(Debug, Clone, Deserialize)]
pub struct V20RollInput {
    #[serde(default)]
    pub id: Option<RollId>,
    pub pool: u32,
    pub difficulty: u8,
    pub dice: Vec<DieFace>,
    pub successes: u32,
    pub is_success: bool,
    pub is_botch: bool,
    #[serde(default)]
    pub specialty: bool,
    #[serde(default)]
    pub willpower: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<V20RollInput> for RollResult {
    type Error = InvalidRollInput;

    fn try_from(value: V20RollInput) -> Result<Self, Self::Error> {
        if !(V20_MIN_TARGET..=V20_MAX_TARGET).contains(&value.difficulty) {
            return Err(InvalidRollInput::V20TargetOutOfRange(value.difficulty));
        }
        let initial = value.pool as usize;
        let explosions = if value.specialty {
            value
                .dice
                .iter()
                .take(initial)
                .filter(|face| face.is_ten())
                .count()
        } else {
            0
        };
        let expected = initial + explosions;
        if value.dice.len() != expected {
            return Err(InvalidRollInput::V20DiceMismatch {
                pool: value.pool,
                expected,
                actual: value.dice.len(),
            });
        }
        let outcome = V20Outcome {
            successes: value.successes,
            is_success: value.is_success,
            is_botch: value.is_botch,
            willpower: value.willpower,
        };
        let result = RollResult::v20(
            DicePool::plain(value.pool),
            RuleSetConfig::v20(value.difficulty, value.specialty),
            value.dice,
            outcome,
        );
        Ok(finish_input(result, value.id, value.description))
    }
}

fn finish_input(
    mut result: RollResult,
    id: Option<RollId>,
    description: Option<String>,
) -> RollResult {
    if let Some(id) = id {
        result = result.with_id(id);
    }
    if let Some(description) = description {
        result = result.with_description(description);
    }
    result
}

// ============================================================================
// Results
// ============================================================================

/// A stored roll on the wire, tagged by rule set
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "version", rename_all = "lowercase")]
pub enum RollResultDto {
    V5(V5ResultDto),
    V20(V20ResultDto),
}

#[derive(Debug, Clone, Serialize)]
pub struct V5ResultDto {
    pub id: RollId,
    pub created_at: String,
    pub pool: u32,
    pub hunger: u32,
    pub difficulty: u8,
    pub regular_dice: Vec<DieFace>,
    pub hunger_dice: Vec<DieFace>,
    pub successes: u32,
    pub margin: i64,
    pub is_success: bool,
    pub is_critical: bool,
    pub is_messy_critical: bool,
    pub is_bestial_failure: bool,
    pub critical_pairs: u32,
    pub regular_tens: u32,
    pub hunger_tens: u32,
    pub hunger_ones: u32,
    pub result_type: V5ResultType,
    pub result_label: String,
    pub willpower_rerolled: bool,
    pub rerolled_indices: Vec<usize>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct V20ResultDto {
    pub id: RollId,
    pub created_at: String,
    pub pool: u32,
    pub difficulty: u8,
    pub specialty: bool,
    pub dice: Vec<DieFace>,
    pub successes: u32,
    pub is_success: bool,
    pub is_botch: bool,
    pub willpower: bool,
    pub ones: u32,
    pub tens: u32,
    pub result_type: V20ResultType,
    pub result_label: String,
    pub description: Option<String>,
}

impl From<&RollResult> for RollResultDto {
    fn from(result: &RollResult) -> Self {
        let config = result.config();
        let id = result.id();
        let created_at = result.created_at().to_rfc3339();
        let description = result.description().map(str::to_string);

        match result.resolution() {
            RollResolution::V5 {
                regular_dice,
                hunger_dice,
                outcome,
            } => {
                // Counts come from the dice so ingested rolls report them too
                let tally = V5Tally::from_dice(regular_dice, hunger_dice);
                let result_type = outcome.result_type();
                Self::V5(V5ResultDto {
                    id,
                    created_at,
                    pool: result.pool().total_dice(),
                    hunger: result.pool().special_dice(),
                    difficulty: config.difficulty(),
                    regular_dice: regular_dice.clone(),
                    hunger_dice: hunger_dice.clone(),
                    successes: outcome.successes,
                    margin: outcome.margin(config.difficulty()),
                    is_success: outcome.is_success,
                    is_critical: outcome.is_critical,
                    is_messy_critical: outcome.is_messy_critical,
                    is_bestial_failure: outcome.is_bestial_failure,
                    critical_pairs: tally.critical_pairs(),
                    regular_tens: tally.regular_tens,
                    hunger_tens: tally.hunger_tens,
                    hunger_ones: tally.hunger_ones,
                    result_type,
                    result_label: result_type.display_name().to_string(),
                    willpower_rerolled: result.reroll_state().used,
                    rerolled_indices: result.reroll_state().rerolled_indices.clone(),
                    description,
                })
            }
            RollResolution::V20 { dice, outcome } => {
                let tally = V20Tally::from_dice(dice, config.target_number());
                let result_type = outcome.result_type();
                Self::V20(V20ResultDto {
                    id,
                    created_at,
                    pool: result.pool().total_dice(),
                    difficulty: config.target_number(),
                    specialty: config.specialty_explosion,
                    dice: dice.clone(),
                    successes: outcome.successes,
                    is_success: outcome.is_success,
                    is_botch: outcome.is_botch,
                    willpower: outcome.willpower,
                    ones: tally.ones,
                    tens: tally.tens,
                    result_type,
                    result_label: result_type.display_name().to_string(),
                    description,
                })
            }
        }
    }
}

impl From<RollResult> for RollResultDto {
    fn from(result: RollResult) -> Self {
        Self::from(&result)
    }
}

// ============================================================================
// Willpower reroll
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RerollRequestDto {
    pub indices: Vec<usize>,
    /// The caller's own willpower check; assumed affordable when omitted
    #[serde(default = "default_can_afford")]
    pub can_afford_willpower: bool,
}

fn default_can_afford() -> bool {
    true
}

impl From<RerollRequestDto> for RerollRequest {
    fn from(value: RerollRequestDto) -> Self {
        Self {
            indices: value.indices,
            can_afford_willpower: value.can_afford_willpower,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RerollResponseDto {
    pub result: RollResultDto,
    pub rerolled: bool,
    pub rejection: Option<String>,
}

impl From<RerollReport> for RerollResponseDto {
    fn from(report: RerollReport) -> Self {
        let rejection = match &report.outcome {
            ConfirmOutcome::Rerolled { .. } => None,
            ConfirmOutcome::Unchanged(reason) => Some(reason.as_str().to_string()),
        };
        Self {
            result: RollResultDto::from(&report.result),
            rerolled: report.outcome.is_rerolled(),
            rejection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_v5_input_kept_as_given() {
        // The flags disagree with the dice; ingestion does not reclassify
        let input: V5RollInput = serde_json::from_value(json!({
            "pool": 3,
            "hunger": 1,
            "difficulty": 2,
            "regular_dice": [1, 2],
            "hunger_dice": [3],
            "successes": 4,
            "is_success": true,
            "is_critical": true,
            "is_messy_critical": false,
            "is_bestial_failure": false,
            "description": "From the table"
        }))
        .unwrap();
        let result = RollResult::try_from(input).unwrap();

        assert_eq!(result.successes(), 4);
        assert!(result.v5_outcome().unwrap().is_critical);
        assert!(!result.reroll_state().used);
        assert_eq!(result.description(), Some("From the table"));
    }

    #[test]
    fn test_input_rejects_bad_faces() {
        let parsed = serde_json::from_value::<V20RollInput>(json!({
            "pool": 1,
            "difficulty": 6,
            "dice": [11],
            "successes": 0,
            "is_success": false,
            "is_botch": false
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_input_keeps_id_and_reroll_state() {
        let id = RollId::new();
        let input: V5RollInput = serde_json::from_value(json!({
            "id": id,
            "pool": 2,
            "hunger": 0,
            "difficulty": 1,
            "regular_dice": [6, 7],
            "hunger_dice": [],
            "successes": 2,
            "is_success": true,
            "is_critical": false,
            "is_messy_critical": false,
            "is_bestial_failure": false,
            "willpower_rerolled": true,
            "rerolled_indices": [1]
        }))
        .unwrap();
        let result = RollResult::try_from(input).unwrap();
        assert_eq!(result.id(), id);
        assert!(result.reroll_state().used);
        assert_eq!(result.reroll_state().rerolled_indices, vec![1]);
    }

    #[test]
    fn test_result_dto_is_version_tagged() {
        let dice: Vec<DieFace> = [6u8, 6, 10].iter().map(|v| DieFace::new(*v).unwrap()).collect();
        let hunger: Vec<DieFace> = [10u8, 3].iter().map(|v| DieFace::new(*v).unwrap()).collect();
        let outcome = crate::domain::services::classify_v5(&dice, &hunger, 6);
        let result =
            RollResult::v5(DicePool::new(5, 2), RuleSetConfig::v5(6), dice, hunger, outcome);

        let value = serde_json::to_value(RollResultDto::from(&result)).unwrap();
        assert_eq!(value["version"], "v5");
        assert_eq!(value["regular_dice"], json!([6, 6, 10]));
        assert_eq!(value["successes"], 6);
        assert_eq!(value["margin"], 0);
        assert_eq!(value["critical_pairs"], 1);
        assert_eq!(value["hunger_tens"], 1);
        assert_eq!(value["result_type"], "messy_critical");
        assert_eq!(value["id"], json!(result.id()));
    }

    #[test]
    fn test_v20_dto_reports_ones_and_tens() {
        let input = V20RollInput {
            id: None,
            pool: 3,
            difficulty: 6,
            dice: [10u8, 1, 1].iter().map(|v| DieFace::new(*v).unwrap()).collect(),
            successes: 0,
            is_success: false,
            is_botch: true,
            specialty: false,
            willpower: false,
            description: None,
        };
        let result = RollResult::try_from(input).unwrap();
        let value = serde_json::to_value(RollResultDto::from(result)).unwrap();
        assert_eq!(value["version"], "v20");
        assert_eq!(value["ones"], 2);
        assert_eq!(value["tens"], 1);
        assert_eq!(value["result_type"], "botch");
    }

    #[test]
    fn test_reroll_request_defaults_to_affordable() {
        let dto: RerollRequestDto = serde_json::from_value(json!({ "indices": [0, 2] })).unwrap();
        let request = RerollRequest::from(dto);
        assert!(request.can_afford_willpower);
        assert_eq!(request.indices, vec![0, 2]);
    }

    fn v5_input(pool: u32, hunger: u32, regular: &[u8], hunger_dice: &[u8]) -> V5RollInput {
        serde_json::from_value(json!({
            "pool": pool,
            "hunger": hunger,
            "difficulty": 1,
            "regular_dice": regular,
            "hunger_dice": hunger_dice,
            "successes": 0,
            "is_success": false,
            "is_critical": false,
            "is_messy_critical": false,
            "is_bestial_failure": false
        }))
        .unwrap()
    }

    #[test]
    fn test_v5_input_dice_must_fill_pool() {
        let err = RollResult::try_from(v5_input(2, 0, &[1, 2, 3, 4, 5], &[6, 7])).unwrap_err();
        assert_eq!(
            err,
            InvalidRollInput::V5DiceMismatch {
                pool: 2,
                hunger: 0,
                regular_dice: 5,
                hunger_dice: 2,
            }
        );

        // Hunger is clamped to the pool before the dice are checked
        let result = RollResult::try_from(v5_input(2, 4, &[], &[6, 7])).unwrap();
        let pool = result.pool();
        assert_eq!(pool.regular_dice() + pool.special_dice(), pool.total_dice());
        assert_eq!(pool.special_dice() as usize, result.hunger_dice().len());
        assert_eq!(pool.regular_dice() as usize, result.regular_dice().len());
    }

    #[test]
    fn test_v20_input_dice_must_fill_pool() {
        let input = |pool: u32, difficulty: u8, specialty: bool, dice: &[u8]| V20RollInput {
            id: None,
            pool,
            difficulty,
            dice: dice.iter().map(|v| DieFace::new(*v).unwrap()).collect(),
            successes: 1,
            is_success: true,
            is_botch: false,
            specialty,
            willpower: false,
            description: None,
        };

        assert_eq!(
            RollResult::try_from(input(2, 6, false, &[7, 8, 9])).unwrap_err(),
            InvalidRollInput::V20DiceMismatch {
                pool: 2,
                expected: 2,
                actual: 3,
            }
        );
        // One initial ten explodes into exactly one extra die
        assert!(RollResult::try_from(input(2, 6, true, &[10, 4, 3])).is_ok());
        assert!(RollResult::try_from(input(2, 6, true, &[10, 4])).is_err());
        assert_eq!(
            RollResult::try_from(input(1, 11, false, &[7])).unwrap_err(),
            InvalidRollInput::V20TargetOutOfRange(11)
        );
    }

    #[test]
    fn test_v20_dto_reports_willpower() {
        let mut faces = [1u8, 3].into_iter().map(|v| DieFace::new(v).unwrap());
        let result = crate::domain::services::roll_v20(DicePool::plain(2), 6, false, true, || {
            faces.next().unwrap()
        });
        let value = serde_json::to_value(RollResultDto::from(&result)).unwrap();
        assert_eq!(value["willpower"], true);
        assert_eq!(value["is_botch"], false);
        assert_eq!(value["result_type"], "failure");
    }
}
