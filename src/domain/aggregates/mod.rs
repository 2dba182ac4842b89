//! Aggregates - Consistency boundaries over groups of entities

mod result_history;

pub use result_history::{ResultHistory, DEFAULT_HISTORY_CAPACITY};
