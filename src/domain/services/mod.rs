//! Domain services - Pure dice resolution rules

mod contests;
mod v20_resolver;
mod v5_checks;
mod v5_resolver;

pub use contests::{contested_v5, resisted_v20, ContestWinner, ContestedRoll};
pub use v20_resolver::{extended_v20, roll_v20, ExtendedRoll, V20Tally, DEFAULT_EXTENDED_MAX_ROLLS};
pub use v5_checks::{
    frenzy_check, remorse_check, rouse_check, willpower_roll, FrenzyCheck, RemorseCheck,
    RouseCheck, DEFAULT_FRENZY_DIFFICULTY,
};
pub use v5_resolver::{classify_v5, roll_v5, V5Tally};
