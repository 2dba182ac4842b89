//! Classified outcomes of a resolved roll

use serde::{Deserialize, Serialize};

/// Outcome of a V5 roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct V5Outcome {
    pub successes: u32,
    pub is_success: bool,
    pub is_critical: bool,
    pub is_messy_critical: bool,
    pub is_bestial_failure: bool,
}

impl V5Outcome {
    /// Successes over (or under, when negative) the difficulty
    pub fn margin(&self, difficulty: u8) -> i64 {
        i64::from(self.successes) - i64::from(difficulty)
    }

    /// Single label for the outcome; bestial failure outranks everything
    pub fn result_type(&self) -> V5ResultType {
        if self.is_bestial_failure {
            V5ResultType::BestialFailure
        } else if self.is_messy_critical {
            V5ResultType::MessyCritical
        } else if self.is_critical {
            V5ResultType::Critical
        } else if self.is_success {
            V5ResultType::Success
        } else {
            V5ResultType::Failure
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum V5ResultType {
    BestialFailure,
    MessyCritical,
    Critical,
    Success,
    Failure,
}

impl V5ResultType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BestialFailure => "Bestial Failure",
            Self::MessyCritical => "Messy Critical",
            Self::Critical => "Critical",
            Self::Success => "Success",
            Self::Failure => "Failure",
        }
    }
}

/// Successes at which a V20 success reads as exceptional
pub const V20_EXCEPTIONAL_SUCCESSES: u32 = 5;

/// Outcome of a V20 roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct V20Outcome {
    pub successes: u32,
    pub is_success: bool,
    pub is_botch: bool,
    /// A willpower point bought one automatic success
    pub willpower: bool,
}

impl V20Outcome {
    pub fn result_type(&self) -> V20ResultType {
        if self.is_botch {
            V20ResultType::Botch
        } else if self.is_success && self.successes >= V20_EXCEPTIONAL_SUCCESSES {
            V20ResultType::Exceptional
        } else if self.is_success {
            V20ResultType::Success
        } else {
            V20ResultType::Failure
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum V20ResultType {
    Botch,
    Exceptional,
    Success,
    Failure,
}

impl V20ResultType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Botch => "Botch",
            Self::Exceptional => "Exceptional Success",
            Self::Success => "Success",
            Self::Failure => "Failure",
        }
    }
}
