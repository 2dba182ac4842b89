//! Dice Service - Application service for rolling, history and rerolls
//!
//! Owns the remembered roll settings and the bounded result history. Every
//! operation is synchronous; callers that share the service across tasks
//! wrap it in a lock and hold it for a single call.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::reroll_controller::{apply_willpower_reroll, ConfirmOutcome};
use crate::application::ports::outbound::RandomPort;
use crate::domain::aggregates::ResultHistory;
use crate::domain::entities::RollResult;
use crate::domain::services::{
    contested_v5, extended_v20, frenzy_check, remorse_check, resisted_v20, roll_v20, roll_v5,
    rouse_check, willpower_roll, ContestedRoll, ExtendedRoll, FrenzyCheck, RemorseCheck,
    RouseCheck, DEFAULT_EXTENDED_MAX_ROLLS, DEFAULT_FRENZY_DIFFICULTY,
};
use crate::domain::value_objects::{
    DicePool, RollId, RollSettings, RuleSetVariant, MAX_HUNGER, MAX_POOL,
};

/// Upper bound on the rolls of one extended attempt
const MAX_EXTENDED_ROLLS: u32 = 100;

/// Errors surfaced at the dice service boundary
#[derive(Debug, thiserror::Error)]
pub enum DiceServiceError {
    #[error("Roll result not found: {0}")]
    ResultNotFound(RollId),
}

/// Request to roll a V5 pool; missing fields fall back to the settings
#[derive(Debug, Clone, Default)]
pub struct V5RollRequest {
    pub pool: Option<u32>,
    pub hunger: Option<u32>,
    pub difficulty: Option<u8>,
    pub description: Option<String>,
}

/// Request to roll a V20 pool; missing fields fall back to the settings
#[derive(Debug, Clone, Default)]
pub struct V20RollRequest {
    pub pool: Option<u32>,
    pub target_number: Option<u8>,
    pub specialty: Option<bool>,
    /// Spend willpower for one automatic success
    pub willpower: bool,
    pub description: Option<String>,
}

/// Two V5 pools rolled against each other
#[derive(Debug, Clone, Default)]
pub struct ContestedV5Request {
    pub attacker_pool: u32,
    pub attacker_hunger: u32,
    pub defender_pool: u32,
    pub defender_hunger: u32,
}

/// Two V20 pools rolled against a shared target number
#[derive(Debug, Clone, Default)]
pub struct ResistedV20Request {
    pub attacker_pool: u32,
    pub defender_pool: u32,
    pub target_number: Option<u8>,
    pub attacker_specialty: bool,
    pub defender_specialty: bool,
}

/// A V20 pool rolled repeatedly toward a success goal
#[derive(Debug, Clone, Default)]
pub struct ExtendedV20Request {
    pub pool: u32,
    pub target_number: Option<u8>,
    pub specialty: bool,
    pub goal: u32,
    pub max_rolls: Option<u32>,
}

/// Request to spend willpower on a stored result
#[derive(Debug, Clone)]
pub struct RerollRequest {
    pub indices: Vec<usize>,
    pub can_afford_willpower: bool,
}

/// A stored result after a reroll attempt, changed or not
#[derive(Debug, Clone)]
pub struct RerollReport {
    pub result: RollResult,
    pub outcome: ConfirmOutcome,
}

pub struct DiceService {
    rng: Arc<dyn RandomPort>,
    history: ResultHistory,
    settings: RollSettings,
}

impl DiceService {
    pub fn new(rng: Arc<dyn RandomPort>, history_capacity: usize, settings: RollSettings) -> Self {
        Self {
            rng,
            history: ResultHistory::with_capacity(history_capacity),
            settings: settings.normalized(),
        }
    }

    // ========================================================================
    // Rolling
    // ========================================================================

    /// Roll a V5 pool and store the result
    #[instrument(skip(self))]
    pub fn roll_v5(&mut self, request: V5RollRequest) -> RollResult {
        let mut effective = self.settings.clone();
        if let Some(pool) = request.pool {
            effective.set_pool(pool);
        }
        if let Some(hunger) = request.hunger {
            effective.set_hunger(hunger);
        }
        if let Some(difficulty) = request.difficulty {
            effective.set_difficulty(difficulty);
        }

        let rng = &self.rng;
        let mut result = roll_v5(
            DicePool::new(effective.pool, effective.hunger),
            effective.difficulty,
            || rng.next_die(),
        );
        if let Some(description) = request.description {
            result = result.with_description(description);
        }
        if let Some(outcome) = result.v5_outcome() {
            info!(
                roll_id = %result.id(),
                successes = outcome.successes,
                result_type = outcome.result_type().display_name(),
                "V5 roll resolved"
            );
        }
        self.store(result)
    }

    /// Roll a V20 pool and store the result
    #[instrument(skip(self))]
    pub fn roll_v20(&mut self, request: V20RollRequest) -> RollResult {
        let mut effective = self.settings.clone();
        if let Some(pool) = request.pool {
            effective.set_dice_pool(pool);
        }
        if let Some(target_number) = request.target_number {
            effective.set_target_number(target_number);
        }
        if let Some(specialty) = request.specialty {
            effective.specialty = specialty;
        }

        let rng = &self.rng;
        let mut result = roll_v20(
            DicePool::plain(effective.dice_pool),
            effective.target_number,
            effective.specialty,
            request.willpower,
            || rng.next_die(),
        );
        if let Some(description) = request.description {
            result = result.with_description(description);
        }
        if let Some(outcome) = result.v20_outcome() {
            info!(
                roll_id = %result.id(),
                successes = outcome.successes,
                result_type = outcome.result_type().display_name(),
                willpower = outcome.willpower,
                "V20 roll resolved"
            );
        }
        self.store(result)
    }

    /// Roll with the settings alone, under the active rule set
    pub fn roll_with_settings(&mut self, description: Option<String>) -> RollResult {
        match self.settings.variant {
            RuleSetVariant::V5 => self.roll_v5(V5RollRequest {
                description,
                ..Default::default()
            }),
            RuleSetVariant::V20 => self.roll_v20(V20RollRequest {
                description,
                ..Default::default()
            }),
        }
    }

    /// Store a result resolved elsewhere, exactly as received
    #[instrument(skip(self, result), fields(roll_id = %result.id()))]
    pub fn ingest(&mut self, result: RollResult) -> RollResult {
        debug!(variant = %result.variant(), "Ingesting external roll");
        self.store(result)
    }

    fn store(&mut self, result: RollResult) -> RollResult {
        if let Some(evicted) = self.history.push(result.clone()) {
            debug!(
                roll_id = %evicted.id(),
                capacity = self.history.capacity(),
                "Evicted oldest roll from history"
            );
        }
        debug!(stored = self.history.len(), "Roll stored");
        result
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Stored results, newest first
    pub fn history(&self) -> impl Iterator<Item = &RollResult> {
        self.history.iter()
    }

    pub fn get(&self, id: RollId) -> Result<&RollResult, DiceServiceError> {
        self.history.get(id).ok_or(DiceServiceError::ResultNotFound(id))
    }

    #[instrument(skip(self))]
    pub fn clear_history(&mut self) {
        if self.history.is_empty() {
            debug!("Roll history already empty");
            return;
        }
        self.history.clear();
        info!("Roll history cleared");
    }

    // ========================================================================
    // Willpower reroll
    // ========================================================================

    /// Reroll the selected regular dice of a stored V5 result
    ///
    /// Anything the workflow refuses comes back as an unchanged result with
    /// the reason attached; only an unknown id is an error.
    #[instrument(skip(self))]
    pub fn confirm_reroll(
        &mut self,
        id: RollId,
        request: RerollRequest,
    ) -> Result<RerollReport, DiceServiceError> {
        let rng = Arc::clone(&self.rng);
        let result = self
            .history
            .get_mut(id)
            .ok_or(DiceServiceError::ResultNotFound(id))?;

        let outcome = apply_willpower_reroll(
            result,
            &request.indices,
            request.can_afford_willpower,
            rng.as_ref(),
        );
        match outcome.rejection() {
            Some(reason) => debug!(roll_id = %id, reason = reason.as_str(), "Reroll refused"),
            None => info!(roll_id = %id, successes = result.successes(), "Reroll applied"),
        }
        Ok(RerollReport {
            result: result.clone(),
            outcome,
        })
    }

    // ========================================================================
    // V5 checks
    // ========================================================================

    #[instrument(skip(self))]
    pub fn rouse_check(&self, reroll: bool) -> RouseCheck {
        let check = rouse_check(reroll, || self.rng.next_die());
        debug!(success = check.success, "Rouse check");
        check
    }

    #[instrument(skip(self))]
    pub fn frenzy_check(&self, willpower: u8, humanity: u8, difficulty: Option<u8>) -> FrenzyCheck {
        let difficulty = difficulty.unwrap_or(DEFAULT_FRENZY_DIFFICULTY);
        let check = frenzy_check(willpower, humanity, difficulty, || self.rng.next_die());
        debug!(resisted = check.resisted, "Frenzy check");
        check
    }

    #[instrument(skip(self))]
    pub fn remorse_check(&self, humanity: u8, stains: u8) -> RemorseCheck {
        let check = remorse_check(humanity, stains, || self.rng.next_die());
        debug!(humanity_lost = check.humanity_lost, "Remorse check");
        check
    }

    /// Roll willpower alone and store the result
    #[instrument(skip(self))]
    pub fn willpower_roll(
        &mut self,
        willpower: u8,
        difficulty: Option<u8>,
        description: Option<String>,
    ) -> RollResult {
        let mut effective = self.settings.clone();
        if let Some(difficulty) = difficulty {
            effective.set_difficulty(difficulty);
        }
        let rng = &self.rng;
        let mut result = willpower_roll(willpower, effective.difficulty, || rng.next_die());
        if let Some(description) = description {
            result = result.with_description(description);
        }
        info!(roll_id = %result.id(), successes = result.successes(), "Willpower roll resolved");
        self.store(result)
    }

    // ========================================================================
    // Opposed and extended rolls
    // ========================================================================

    /// Opposed V5 roll; neither side is stored in the history
    #[instrument(skip(self))]
    pub fn contested_v5(&self, request: ContestedV5Request) -> ContestedRoll {
        let attacker = DicePool::new(
            request.attacker_pool.min(MAX_POOL),
            request.attacker_hunger.min(MAX_HUNGER),
        );
        let defender = DicePool::new(
            request.defender_pool.min(MAX_POOL),
            request.defender_hunger.min(MAX_HUNGER),
        );
        let contest = contested_v5(attacker, defender, || self.rng.next_die());
        debug!(winner = ?contest.winner, margin = contest.margin, "V5 contest resolved");
        contest
    }

    /// Resisted V20 roll; the target number falls back to the settings
    #[instrument(skip(self))]
    pub fn resisted_v20(&self, request: ResistedV20Request) -> ContestedRoll {
        let target_number = request
            .target_number
            .unwrap_or(self.settings.target_number);
        let contest = resisted_v20(
            DicePool::plain(request.attacker_pool.clamp(1, MAX_POOL)),
            DicePool::plain(request.defender_pool.clamp(1, MAX_POOL)),
            target_number,
            (request.attacker_specialty, request.defender_specialty),
            || self.rng.next_die(),
        );
        debug!(winner = ?contest.winner, margin = contest.margin, "V20 resisted roll resolved");
        contest
    }

    /// Extended V20 roll; the individual rolls are not stored
    #[instrument(skip(self))]
    pub fn extended_v20(&self, request: ExtendedV20Request) -> ExtendedRoll {
        let target_number = request
            .target_number
            .unwrap_or(self.settings.target_number);
        let max_rolls = request
            .max_rolls
            .unwrap_or(DEFAULT_EXTENDED_MAX_ROLLS)
            .clamp(1, MAX_EXTENDED_ROLLS);
        let extended = extended_v20(
            DicePool::plain(request.pool.clamp(1, MAX_POOL)),
            target_number,
            request.specialty,
            request.goal,
            max_rolls,
            || self.rng.next_die(),
        );
        debug!(
            rolls = extended.rolls.len(),
            total_successes = extended.total_successes,
            botched = extended.botched,
            "V20 extended roll resolved"
        );
        extended
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn settings(&self) -> &RollSettings {
        &self.settings
    }

    /// Replace the settings, clamping every field into range
    #[instrument(skip(self))]
    pub fn update_settings(&mut self, settings: RollSettings) -> RollSettings {
        self.settings = settings.normalized();
        self.settings.clone()
    }

    /// Back to the environment defaults
    pub fn reset_settings(&mut self) -> RollSettings {
        self.update_settings(RollSettings::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::FixedRandomPort;
    use crate::application::services::reroll_controller::RerollRejection;
    use crate::domain::entities::V5Outcome;
    use crate::domain::value_objects::{DieFace, RuleSetConfig};

    fn service(faces: &[u8]) -> DiceService {
        DiceService::new(
            Arc::new(FixedRandomPort::new(faces)),
            50,
            RollSettings::default(),
        )
    }

    fn faces(values: &[u8]) -> Vec<DieFace> {
        values.iter().map(|v| DieFace::new(*v).unwrap()).collect()
    }

    #[test]
    fn test_roll_v5_uses_request_and_stores() {
        let mut service = service(&[6, 6, 10, 10, 3]);
        let result = service.roll_v5(V5RollRequest {
            pool: Some(5),
            hunger: Some(2),
            difficulty: Some(6),
            description: Some("Intimidate the sheriff".to_string()),
        });

        assert_eq!(result.successes(), 6);
        assert!(result.v5_outcome().unwrap().is_messy_critical);
        assert_eq!(result.description(), Some("Intimidate the sheriff"));
        assert_eq!(service.history().count(), 1);
        assert_eq!(service.get(result.id()).unwrap(), &result);
    }

    #[test]
    fn test_roll_v5_falls_back_to_settings() {
        let mut service = service(&[4]);
        let result = service.roll_v5(V5RollRequest::default());

        assert_eq!(result.pool().total_dice(), 5);
        assert_eq!(result.hunger_dice().len(), 1);
        assert_eq!(result.config().difficulty(), 1);
    }

    #[test]
    fn test_roll_request_is_clamped() {
        let mut service = service(&[4]);
        let result = service.roll_v5(V5RollRequest {
            pool: Some(99),
            hunger: Some(9),
            difficulty: Some(0),
            description: None,
        });
        assert_eq!(result.pool().total_dice(), 30);
        assert_eq!(result.hunger_dice().len(), 5);
        assert_eq!(result.config().difficulty(), 1);
        // Requests never change the remembered settings
        assert_eq!(service.settings(), &RollSettings::default());
    }

    #[test]
    fn test_roll_v20_botch_scenario() {
        let mut service = service(&[1, 3, 5, 2]);
        let result = service.roll_v20(V20RollRequest {
            pool: Some(4),
            target_number: Some(6),
            specialty: Some(false),
            ..Default::default()
        });
        let outcome = result.v20_outcome().unwrap();
        assert_eq!(outcome.successes, 0);
        assert!(!outcome.is_success);
        assert!(outcome.is_botch);
    }

    #[test]
    fn test_roll_v20_with_willpower_avoids_botch() {
        let mut service = service(&[1, 3]);
        let result = service.roll_v20(V20RollRequest {
            pool: Some(2),
            target_number: Some(6),
            willpower: true,
            ..Default::default()
        });
        let outcome = result.v20_outcome().unwrap();
        assert_eq!(outcome.successes, 0);
        assert!(!outcome.is_botch);
        assert!(outcome.willpower);
    }

    #[test]
    fn test_roll_with_settings_follows_variant() {
        let mut service = service(&[7]);
        let mut settings = RollSettings::default();
        settings.variant = RuleSetVariant::V20;
        service.update_settings(settings);

        let result = service.roll_with_settings(None);
        assert_eq!(result.variant(), RuleSetVariant::V20);
        assert_eq!(result.pool().total_dice(), 5);
    }

    #[test]
    fn test_reroll_through_service() {
        let mut service = service(&[2, 3, 4, 7, 8, 9, 10]);
        let rolled = service.roll_v5(V5RollRequest {
            pool: Some(5),
            hunger: Some(2),
            difficulty: Some(6),
            description: None,
        });

        let report = service
            .confirm_reroll(
                rolled.id(),
                RerollRequest {
                    indices: vec![0, 1],
                    can_afford_willpower: true,
                },
            )
            .unwrap();
        assert!(report.outcome.is_rerolled());
        assert_eq!(report.result.successes(), 4);
        assert!(!report.result.is_success());
        assert_eq!(service.get(rolled.id()).unwrap(), &report.result);

        let replay = service
            .confirm_reroll(
                rolled.id(),
                RerollRequest {
                    indices: vec![2],
                    can_afford_willpower: true,
                },
            )
            .unwrap();
        assert_eq!(
            replay.outcome,
            ConfirmOutcome::Unchanged(RerollRejection::AlreadyRerolled)
        );
        assert_eq!(replay.result, report.result);
    }

    #[test]
    fn test_reroll_unknown_id_is_not_found() {
        let mut service = service(&[5]);
        let err = service
            .confirm_reroll(
                RollId::new(),
                RerollRequest {
                    indices: vec![0],
                    can_afford_willpower: true,
                },
            )
            .unwrap_err();
        assert!(matches!(err, DiceServiceError::ResultNotFound(_)));
    }

    #[test]
    fn test_ingested_copy_of_used_roll_fails_closed() {
        let mut service = service(&[10]);
        let outcome = V5Outcome {
            successes: 1,
            is_success: true,
            ..Default::default()
        };
        let external = RollResult::v5(
            DicePool::new(3, 1),
            RuleSetConfig::v5(1),
            faces(&[2, 6]),
            faces(&[4]),
            outcome,
        )
        .with_reroll_state(crate::domain::entities::RerollState {
            used: true,
            rerolled_indices: vec![0],
        });
        let stored = service.ingest(external.clone());
        assert_eq!(stored, external);

        let report = service
            .confirm_reroll(
                stored.id(),
                RerollRequest {
                    indices: vec![0, 1],
                    can_afford_willpower: true,
                },
            )
            .unwrap();
        assert!(!report.outcome.is_rerolled());
        assert_eq!(report.result, external);
    }

    #[test]
    fn test_history_capacity_and_clear() {
        let mut service = DiceService::new(
            Arc::new(FixedRandomPort::new(&[5])),
            2,
            RollSettings::default(),
        );
        let first = service.roll_with_settings(Some("first".into()));
        service.roll_with_settings(Some("second".into()));
        service.roll_with_settings(Some("third".into()));

        let order: Vec<_> = service.history().filter_map(|r| r.description()).collect();
        assert_eq!(order, vec!["third", "second"]);
        assert!(service.get(first.id()).is_err());

        service.clear_history();
        assert_eq!(service.history().count(), 0);
    }

    #[test]
    fn test_checks_use_random_port() {
        let service = service(&[3, 8]);
        let rouse = service.rouse_check(true);
        assert!(rouse.success);
        assert_eq!(rouse.dice, faces(&[3, 8]));

        let frenzy = service.frenzy_check(2, 3, None);
        assert_eq!(frenzy.pool, 3);
        assert_eq!(frenzy.difficulty, DEFAULT_FRENZY_DIFFICULTY);

        let remorse = service.remorse_check(9, 3);
        assert_eq!(remorse.pool, 6);
        assert_eq!(remorse.dice.len(), 6);
    }

    #[test]
    fn test_rouse_reroll_only_after_failure() {
        let service = service(&[8, 2]);
        let rouse = service.rouse_check(true);
        assert!(rouse.success);
        assert!(!rouse.rerolled);
        assert_eq!(rouse.dice, faces(&[8]));
    }

    #[test]
    fn test_willpower_roll_is_stored() {
        let mut service = service(&[7, 2, 9]);
        let result = service.willpower_roll(3, Some(2), Some("Resist the blood bond".into()));
        assert_eq!(result.successes(), 2);
        assert!(result.is_success());
        assert!(result.hunger_dice().is_empty());
        assert_eq!(service.get(result.id()).unwrap(), &result);
    }

    #[test]
    fn test_contests_are_not_stored() {
        let service = service(&[8, 8, 3]);
        let contest = service.contested_v5(ContestedV5Request {
            attacker_pool: 2,
            defender_pool: 1,
            ..Default::default()
        });
        assert_eq!(contest.winner, crate::domain::services::ContestWinner::Attacker);
        assert_eq!(contest.margin, 2);

        let resisted = service.resisted_v20(ResistedV20Request {
            attacker_pool: 1,
            defender_pool: 1,
            target_number: Some(8),
            ..Default::default()
        });
        // Faces cycle: the attacker draws 8, the defender draws 8
        assert_eq!(resisted.margin, 0);
        assert_eq!(service.history().count(), 0);
    }

    #[test]
    fn test_extended_roll_caps_rolls() {
        let service = service(&[2]);
        let extended = service.extended_v20(ExtendedV20Request {
            pool: 2,
            goal: 1,
            max_rolls: Some(500),
            ..Default::default()
        });
        assert_eq!(extended.rolls.len(), MAX_EXTENDED_ROLLS as usize);
        assert!(!extended.is_success());

        let defaulted = service.extended_v20(ExtendedV20Request {
            pool: 1,
            goal: 4,
            ..Default::default()
        });
        assert_eq!(defaulted.rolls.len(), DEFAULT_EXTENDED_MAX_ROLLS as usize);
    }

    #[test]
    fn test_update_and_reset_settings() {
        let mut service = service(&[5]);
        let mut settings = RollSettings::default();
        settings.hunger = 12;
        settings.target_number = 1;

        let stored = service.update_settings(settings);
        assert_eq!(stored.hunger, 5);
        assert_eq!(stored.target_number, 2);
        assert_eq!(service.settings(), &stored);

        let reset = service.reset_settings();
        assert_eq!(service.settings(), &reset);
    }
}
