//! Random port - Interface for drawing die faces
//!
//! This port abstracts the source of randomness used by the dice services,
//! so resolution and rerolls can run against a scripted sequence in tests
//! while the infrastructure supplies a real generator in production.

use crate::domain::value_objects::DieFace;

/// Port for drawing uniformly distributed d10 faces
///
/// # Implementations
///
/// - `ThreadRngAdapter` in infrastructure (production, `rand::thread_rng()`)
/// - `SeededRngAdapter` in infrastructure (reproducible sessions)
/// - `FixedRandomPort` (tests, scripted faces)
///
/// # Examples
///
/// ```ignore
/// fn roll_pool(rng: &dyn RandomPort, count: u32) -> Vec<DieFace> {
///     (0..count).map(|_| rng.next_die()).collect()
/// }
/// ```
pub trait RandomPort: Send + Sync {
    /// Draw one face, uniform over 1..=10
    fn next_die(&self) -> DieFace;
}

/// Scripted random port returning faces in order, cycling when exhausted
#[cfg(test)]
#[derive(Debug)]
pub struct FixedRandomPort {
    faces: Vec<DieFace>,
    index: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl FixedRandomPort {
    /// Script the given faces; values outside 1..=10 are a test bug
    pub fn new(values: &[u8]) -> Self {
        assert!(!values.is_empty(), "FixedRandomPort needs at least one face");
        Self {
            faces: values
                .iter()
                .map(|v| DieFace::new(*v).expect("scripted face out of range"))
                .collect(),
            index: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// How many faces have been drawn so far
    pub fn draws(&self) -> usize {
        self.index.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl RandomPort for FixedRandomPort {
    fn next_die(&self) -> DieFace {
        let idx = self
            .index
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.faces[idx % self.faces.len()]
    }
}
