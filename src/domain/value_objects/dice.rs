//! Dice value objects - faces, categories and pools

use serde::{Deserialize, Serialize};

/// Number of sides on every die in both rule sets
pub const DIE_SIDES: u8 = 10;

/// A single d10 face in the range 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    pub const ONE: DieFace = DieFace(1);
    pub const TEN: DieFace = DieFace(DIE_SIDES);

    /// Build a face, returning `None` outside 1..=10
    pub fn new(value: u8) -> Option<Self> {
        (1..=DIE_SIDES).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_one(self) -> bool {
        self == Self::ONE
    }

    pub fn is_ten(self) -> bool {
        self == Self::TEN
    }

    /// V5 success: any face of 6 or more
    pub fn is_v5_success(self) -> bool {
        self.0 >= 6
    }
}

impl TryFrom<u8> for DieFace {
    type Error = InvalidDieFace;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidDieFace(value))
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> u8 {
        face.0
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Die face {0} is outside 1..=10")]
pub struct InvalidDieFace(pub u8);

/// Which part of a V5 pool a die belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieCategory {
    Regular,
    /// Hunger die
    Special,
}

/// How many dice to roll, and how many of them are hunger dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DicePool {
    total_dice: u32,
    special_dice: u32,
}

impl DicePool {
    /// Build a pool; a hunger count above the pool size is clamped to it
    pub fn new(total_dice: u32, special_dice: u32) -> Self {
        Self {
            total_dice,
            special_dice: special_dice.min(total_dice),
        }
    }

    /// A pool without hunger dice (V20, frenzy and remorse checks)
    pub fn plain(total_dice: u32) -> Self {
        Self::new(total_dice, 0)
    }

    pub fn total_dice(&self) -> u32 {
        self.total_dice
    }

    pub fn special_dice(&self) -> u32 {
        self.special_dice
    }

    pub fn regular_dice(&self) -> u32 {
        self.total_dice - self.special_dice
    }
}
