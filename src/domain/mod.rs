//! Domain layer - Core dice rules with no I/O
//!
//! This layer contains:
//! - Value Objects: die faces, pools, rule set configuration, roll settings
//! - Entities: roll results and their classified outcomes
//! - Aggregates: the bounded result history
//! - Domain Services: the V5 and V20 resolvers, V5 special checks, and
//!   opposed and extended rolls

pub mod aggregates;
pub mod entities;
pub mod services;
pub mod value_objects;
