//! Application services - Use case implementations
//!
//! The dice service owns settings and history and drives the domain
//! resolvers through the random port. The reroll controller is the V5
//! willpower workflow it applies to stored results.

pub mod dice_service;
pub mod reroll_controller;

pub use dice_service::{
    ContestedV5Request, DiceService, DiceServiceError, ExtendedV20Request, RerollReport,
    RerollRequest, ResistedV20Request, V20RollRequest, V5RollRequest,
};
pub use reroll_controller::ConfirmOutcome;
