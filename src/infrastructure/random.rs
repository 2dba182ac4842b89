//! Random adapters - `RandomPort` backed by the `rand` crate

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::ports::outbound::RandomPort;
use crate::domain::value_objects::{DieFace, DIE_SIDES};

fn face_from(value: u8) -> DieFace {
    // gen_range(1..=DIE_SIDES) always lands on a valid face
    DieFace::new(value).unwrap_or(DieFace::ONE)
}

/// Production adapter drawing from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngAdapter;

impl ThreadRngAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl RandomPort for ThreadRngAdapter {
    fn next_die(&self) -> DieFace {
        face_from(rand::thread_rng().gen_range(1..=DIE_SIDES))
    }
}

/// Reproducible adapter over a seeded `StdRng`
#[derive(Debug)]
pub struct SeededRngAdapter {
    rng: Mutex<StdRng>,
}

impl SeededRngAdapter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomPort for SeededRngAdapter {
    fn next_die(&self) -> DieFace {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        face_from(rng.gen_range(1..=DIE_SIDES))
    }
}
