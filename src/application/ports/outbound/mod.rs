//! Outbound ports - Interfaces that the application requires from external systems

mod random_port;

#[cfg(test)]
pub use random_port::FixedRandomPort;
pub use random_port::RandomPort;
