//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Table loading happens before the core runs, so the only port left is
//! randomness (for testing).

mod testing;

pub use testing::RandomPort;

#[cfg(test)]
pub use testing::MockRandomPort;
