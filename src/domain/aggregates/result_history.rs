//! Result History Aggregate - The bounded list of recent rolls
//!
//! Newest results sit at the front. Pushing past capacity drops the oldest
//! result; nothing else reorders the list.

use std::collections::VecDeque;

use crate::domain::entities::RollResult;
use crate::domain::value_objects::RollId;

/// How many results the history keeps by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Bounded, newest-first buffer of resolved rolls
#[derive(Debug, Clone)]
pub struct ResultHistory {
    results: VecDeque<RollResult>,
    capacity: usize,
}

impl ResultHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// A history holding at most `capacity` results (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            results: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results newest-first
    pub fn iter(&self) -> impl Iterator<Item = &RollResult> {
        self.results.iter()
    }

    /// The result at `position`, 0 being the newest
    #[cfg(test)]
    pub fn at(&self, position: usize) -> Option<&RollResult> {
        self.results.get(position)
    }

    // ========================================================================
    // Finders
    // ========================================================================

    pub fn get(&self, id: RollId) -> Option<&RollResult> {
        self.results.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: RollId) -> Option<&mut RollResult> {
        self.results.iter_mut().find(|r| r.id() == id)
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Insert at the front, returning the evicted oldest result if full
    pub fn push(&mut self, result: RollResult) -> Option<RollResult> {
        self.results.push_front(result);
        if self.results.len() > self.capacity {
            self.results.pop_back()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }
}

impl Default for ResultHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::V5Outcome;
    use crate::domain::value_objects::{DicePool, RuleSetConfig};

    fn result(description: &str) -> RollResult {
        RollResult::v5(
            DicePool::new(0, 0),
            RuleSetConfig::v5(1),
            Vec::new(),
            Vec::new(),
            V5Outcome::default(),
        )
        .with_description(description)
    }

    #[test]
    fn test_newest_first() {
        let mut history = ResultHistory::new();
        history.push(result("first"));
        history.push(result("second"));

        let order: Vec<_> = history.iter().filter_map(|r| r.description()).collect();
        assert_eq!(order, vec!["second", "first"]);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut history = ResultHistory::new();
        for n in 0..DEFAULT_HISTORY_CAPACITY {
            assert!(history.push(result(&n.to_string())).is_none());
        }
        let evicted = history.push(result("latest"));

        assert_eq!(history.len(), 50);
        assert_eq!(evicted.as_ref().and_then(|r| r.description()), Some("0"));
        assert_eq!(history.at(0).and_then(|r| r.description()), Some("latest"));
        assert_eq!(history.at(49).and_then(|r| r.description()), Some("1"));
    }

    #[test]
    fn test_lookup_and_clear() {
        let mut history = ResultHistory::with_capacity(3);
        let kept = result("kept");
        let id = kept.id();
        history.push(kept);
        history.push(result("other"));

        assert_eq!(history.get(id).and_then(|r| r.description()), Some("kept"));
        assert!(history.get_mut(id).is_some());
        assert!(history.get(RollId::new()).is_none());

        history.clear();
        assert!(history.is_empty());
        assert!(history.get(id).is_none());
    }

    #[test]
    fn test_capacity_is_at_least_one() {
        let mut history = ResultHistory::with_capacity(0);
        assert_eq!(history.capacity(), 1);
        history.push(result("a"));
        history.push(result("b"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.at(0).and_then(|r| r.description()), Some("b"));
    }
}
