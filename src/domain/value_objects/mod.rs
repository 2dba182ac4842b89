//! Value objects - Immutable objects defined by their attributes

mod dice;
mod ids;
mod rule_system;
mod settings;

pub use dice::{DicePool, DieCategory, DieFace, DIE_SIDES};
pub use ids::*;
pub use rule_system::{RuleSetConfig, RuleSetVariant};
pub use settings::{RollSettings, MAX_HUNGER, MAX_POOL};
