//! Reroll Controller - the V5 willpower reroll workflow
//!
//! A player spends willpower to redraw up to three regular dice of a V5
//! result, once per result. The workflow is a small state machine:
//!
//! ```text
//! Idle --start--> Selecting --confirm--> Resolved
//!   ^                 |
//!   +-----cancel------+
//! ```
//!
//! The controller holds the only mutable borrow of its result, so the
//! `used` flag has a single writer. Affordability is the caller's call;
//! the controller never checks a willpower balance.

use tracing::debug;

use crate::application::ports::outbound::RandomPort;
use crate::domain::entities::RollResult;
use crate::domain::services::classify_v5;
use crate::domain::value_objects::RuleSetVariant;

/// Most regular dice a single willpower reroll may redraw
pub const MAX_REROLL_DICE: usize = 3;

/// Ordered set of selected regular-die indices, capped at three
///
/// Inserting into a full selection is refused rather than truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DieSelection {
    indices: Vec<usize>,
}

impl DieSelection {
    pub fn new() -> Self {
        Self {
            indices: Vec::with_capacity(MAX_REROLL_DICE),
        }
    }

    /// Add an index; false if already present or the selection is full
    pub fn insert(&mut self, index: usize) -> bool {
        if self.contains(index) || self.is_full() {
            return false;
        }
        self.indices.push(index);
        true
    }

    pub fn remove(&mut self, index: usize) -> bool {
        let before = self.indices.len();
        self.indices.retain(|i| *i != index);
        self.indices.len() != before
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.indices.len() >= MAX_REROLL_DICE
    }

    /// Indices in selection order
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.indices
    }
}

/// Where the workflow stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RerollPhase {
    Idle,
    Selecting(DieSelection),
    /// Terminal: the reroll of this result is spent
    Resolved,
}

/// Why a transition left everything unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RerollRejection {
    /// Reroll already spent on this result
    AlreadyRerolled,
    /// Confirm with nothing selected
    EmptySelection,
    /// Out of bounds, or the selection already holds three dice
    InvalidSelection,
    /// Start refused: cannot afford, no regular dice, or not V5
    NotAvailable,
    /// Transition called from the wrong phase
    WrongPhase,
}

impl RerollRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyRerolled => "already_rerolled",
            Self::EmptySelection => "empty_selection",
            Self::InvalidSelection => "invalid_selection",
            Self::NotAvailable => "not_available",
            Self::WrongPhase => "wrong_phase",
        }
    }
}

/// Effect of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    Ignored(RerollRejection),
}

/// Effect of a confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Rerolled { indices: Vec<usize> },
    Unchanged(RerollRejection),
}

impl ConfirmOutcome {
    pub fn is_rerolled(&self) -> bool {
        matches!(self, Self::Rerolled { .. })
    }

    pub fn rejection(&self) -> Option<RerollRejection> {
        match self {
            Self::Rerolled { .. } => None,
            Self::Unchanged(reason) => Some(*reason),
        }
    }
}

/// Drives one willpower reroll over one result
#[derive(Debug)]
pub struct RerollController<'r> {
    result: &'r mut RollResult,
    phase: RerollPhase,
}

impl<'r> RerollController<'r> {
    pub fn new(result: &'r mut RollResult) -> Self {
        let phase = if result.reroll_state().used {
            RerollPhase::Resolved
        } else {
            RerollPhase::Idle
        };
        Self { result, phase }
    }

    #[cfg(test)]
    pub fn phase(&self) -> &RerollPhase {
        &self.phase
    }

    pub fn result(&self) -> &RollResult {
        self.result
    }

    pub fn selection(&self) -> Option<&DieSelection> {
        match &self.phase {
            RerollPhase::Selecting(selection) => Some(selection),
            _ => None,
        }
    }

    /// Whether a reroll could start, given the caller's affordability check
    pub fn can_start(&self, can_afford: bool) -> bool {
        self.result.variant() == RuleSetVariant::V5
            && !self.result.reroll_state().used
            && can_afford
            && !self.result.regular_dice().is_empty()
    }

    /// Idle -> Selecting with an empty selection
    pub fn start_reroll(&mut self, can_afford: bool) -> Result<(), RerollRejection> {
        if self.phase != RerollPhase::Idle {
            return Err(RerollRejection::WrongPhase);
        }
        if !self.can_start(can_afford) {
            return Err(RerollRejection::NotAvailable);
        }
        self.phase = RerollPhase::Selecting(DieSelection::new());
        Ok(())
    }

    /// Select or deselect a regular die; hunger dice cannot be addressed
    pub fn toggle_die(&mut self, index: usize) -> SelectionChange {
        let regular_count = self.result.regular_dice().len();
        let RerollPhase::Selecting(selection) = &mut self.phase else {
            return SelectionChange::Ignored(RerollRejection::WrongPhase);
        };

        if selection.remove(index) {
            return SelectionChange::Removed;
        }
        if index >= regular_count || !selection.insert(index) {
            debug!(roll_id = %self.result.id(), index, "Ignoring die selection");
            return SelectionChange::Ignored(RerollRejection::InvalidSelection);
        }
        SelectionChange::Added
    }

    /// Selecting -> Idle, discarding the selection
    pub fn cancel(&mut self) -> bool {
        if matches!(self.phase, RerollPhase::Selecting(_)) {
            self.phase = RerollPhase::Idle;
            true
        } else {
            false
        }
    }

    /// Redraw the selected dice and reclassify the whole roll
    ///
    /// The spent flag is checked before anything else, so replaying a
    /// confirm against an already rerolled result changes nothing.
    pub fn confirm(&mut self, rng: &dyn RandomPort) -> ConfirmOutcome {
        if self.result.reroll_state().used {
            debug!(roll_id = %self.result.id(), "Reroll already used");
            return ConfirmOutcome::Unchanged(RerollRejection::AlreadyRerolled);
        }
        let selection = match &self.phase {
            RerollPhase::Selecting(selection) if !selection.is_empty() => selection.clone(),
            RerollPhase::Selecting(_) => {
                return ConfirmOutcome::Unchanged(RerollRejection::EmptySelection)
            }
            _ => return ConfirmOutcome::Unchanged(RerollRejection::WrongPhase),
        };

        let mut regular_dice = self.result.regular_dice().to_vec();
        for index in selection.as_slice() {
            if let Some(face) = regular_dice.get_mut(*index) {
                *face = rng.next_die();
            }
        }
        let outcome = classify_v5(
            &regular_dice,
            self.result.hunger_dice(),
            self.result.config().difficulty(),
        );

        let indices = selection.into_vec();
        if !self.result.commit_reroll(regular_dice, indices.clone(), outcome) {
            return ConfirmOutcome::Unchanged(RerollRejection::NotAvailable);
        }
        self.phase = RerollPhase::Resolved;
        debug!(
            roll_id = %self.result.id(),
            ?indices,
            successes = outcome.successes,
            "Willpower reroll resolved"
        );
        ConfirmOutcome::Rerolled { indices }
    }
}

/// Run the whole workflow for a known selection
///
/// Repeated indices in `indices` are selected once.
pub fn apply_willpower_reroll(
    result: &mut RollResult,
    indices: &[usize],
    can_afford: bool,
    rng: &dyn RandomPort,
) -> ConfirmOutcome {
    let mut controller = RerollController::new(result);
    if controller.result().reroll_state().used {
        return ConfirmOutcome::Unchanged(RerollRejection::AlreadyRerolled);
    }
    if let Err(rejection) = controller.start_reroll(can_afford) {
        return ConfirmOutcome::Unchanged(rejection);
    }
    for index in indices {
        let already_selected = controller
            .selection()
            .is_some_and(|selection| selection.contains(*index));
        if !already_selected {
            controller.toggle_die(*index);
        }
    }
    let selected = controller.selection().map_or(0, DieSelection::len);
    if selected == 0 {
        controller.cancel();
        return ConfirmOutcome::Unchanged(RerollRejection::EmptySelection);
    }
    debug!(roll_id = %controller.result().id(), selected, "Confirming willpower reroll");
    controller.confirm(rng)
}
