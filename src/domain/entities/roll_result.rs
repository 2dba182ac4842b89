//! Roll result entity - a resolved dice roll and its willpower reroll state
//!
//! A result is created once, already classified. A V5 result may be changed
//! exactly once afterwards by a willpower reroll; after that it is frozen.

use chrono::{DateTime, Utc};

use super::roll_outcome::{V20Outcome, V5Outcome};
use crate::domain::value_objects::{DicePool, DieFace, RollId, RuleSetConfig, RuleSetVariant};

/// Whether the one willpower reroll of a result has been spent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RerollState {
    pub used: bool,
    /// Positions in the regular dice that were redrawn
    pub rerolled_indices: Vec<usize>,
}

/// Dice and classification, per rule set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollResolution {
    V5 {
        regular_dice: Vec<DieFace>,
        hunger_dice: Vec<DieFace>,
        outcome: V5Outcome,
    },
    V20 {
        /// Includes dice added by specialty explosions
        dice: Vec<DieFace>,
        outcome: V20Outcome,
    },
}

/// A resolved roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollResult {
    id: RollId,
    created_at: DateTime<Utc>,
    pool: DicePool,
    config: RuleSetConfig,
    resolution: RollResolution,
    reroll_state: RerollState,
    description: Option<String>,
}

impl RollResult {
    pub fn v5(
        pool: DicePool,
        config: RuleSetConfig,
        regular_dice: Vec<DieFace>,
        hunger_dice: Vec<DieFace>,
        outcome: V5Outcome,
    ) -> Self {
        Self::new(
            pool,
            config,
            RollResolution::V5 {
                regular_dice,
                hunger_dice,
                outcome,
            },
        )
    }

    pub fn v20(
        pool: DicePool,
        config: RuleSetConfig,
        dice: Vec<DieFace>,
        outcome: V20Outcome,
    ) -> Self {
        Self::new(pool, config, RollResolution::V20 { dice, outcome })
    }

    fn new(pool: DicePool, config: RuleSetConfig, resolution: RollResolution) -> Self {
        Self {
            id: RollId::new(),
            created_at: Utc::now(),
            pool,
            config,
            resolution,
            reroll_state: RerollState::default(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_id(mut self, id: RollId) -> Self {
        self.id = id;
        self
    }

    /// Restore the reroll state of a result received from elsewhere
    pub fn with_reroll_state(mut self, reroll_state: RerollState) -> Self {
        self.reroll_state = reroll_state;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> RollId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn pool(&self) -> DicePool {
        self.pool
    }

    pub fn config(&self) -> RuleSetConfig {
        self.config
    }

    pub fn variant(&self) -> RuleSetVariant {
        match self.resolution {
            RollResolution::V5 { .. } => RuleSetVariant::V5,
            RollResolution::V20 { .. } => RuleSetVariant::V20,
        }
    }

    pub fn resolution(&self) -> &RollResolution {
        &self.resolution
    }

    pub fn reroll_state(&self) -> &RerollState {
        &self.reroll_state
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn successes(&self) -> u32 {
        match &self.resolution {
            RollResolution::V5 { outcome, .. } => outcome.successes,
            RollResolution::V20 { outcome, .. } => outcome.successes,
        }
    }

    pub fn is_success(&self) -> bool {
        match &self.resolution {
            RollResolution::V5 { outcome, .. } => outcome.is_success,
            RollResolution::V20 { outcome, .. } => outcome.is_success,
        }
    }

    /// Regular dice of a V5 roll; empty for V20
    pub fn regular_dice(&self) -> &[DieFace] {
        match &self.resolution {
            RollResolution::V5 { regular_dice, .. } => regular_dice,
            RollResolution::V20 { .. } => &[],
        }
    }

    /// Hunger dice of a V5 roll; empty for V20
    pub fn hunger_dice(&self) -> &[DieFace] {
        match &self.resolution {
            RollResolution::V5 { hunger_dice, .. } => hunger_dice,
            RollResolution::V20 { .. } => &[],
        }
    }

    pub fn v5_outcome(&self) -> Option<&V5Outcome> {
        match &self.resolution {
            RollResolution::V5 { outcome, .. } => Some(outcome),
            RollResolution::V20 { .. } => None,
        }
    }

    pub fn v20_outcome(&self) -> Option<&V20Outcome> {
        match &self.resolution {
            RollResolution::V20 { outcome, .. } => Some(outcome),
            RollResolution::V5 { .. } => None,
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Commit a willpower reroll: new regular dice plus the reclassified
    /// outcome. Refused once the reroll is spent or on V20 results.
    pub(crate) fn commit_reroll(
        &mut self,
        new_regular_dice: Vec<DieFace>,
        rerolled_indices: Vec<usize>,
        new_outcome: V5Outcome,
    ) -> bool {
        if self.reroll_state.used {
            return false;
        }
        match &mut self.resolution {
            RollResolution::V5 {
                regular_dice,
                outcome,
                ..
            } if regular_dice.len() == new_regular_dice.len() => {
                *regular_dice = new_regular_dice;
                *outcome = new_outcome;
                self.reroll_state = RerollState {
                    used: true,
                    rerolled_indices,
                };
                true
            }
            _ => false,
        }
    }
}
