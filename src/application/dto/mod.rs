//! Data Transfer Objects - For API boundaries
//!
//! Wire shapes for the HTTP layer. Conversions into service requests and out
//! of domain results live next to each DTO.

pub mod checks;
pub mod contests;
pub mod dice;

pub use checks::*;
pub use contests::*;
pub use dice::*;
