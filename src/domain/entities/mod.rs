//! Domain entities - Core business objects with identity

mod roll_outcome;
mod roll_result;

pub use roll_outcome::{V20Outcome, V20ResultType, V5Outcome, V5ResultType};
pub use roll_result::{RerollState, RollResolution, RollResult};
