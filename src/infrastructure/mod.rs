//! Infrastructure layer - Adapters for configuration, randomness and HTTP

pub mod config;
pub mod http;
pub mod random;
pub mod state;
