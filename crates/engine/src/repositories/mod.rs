//! Repository modules - Wrappers around port traits.
//!
//! Each repository wraps a port trait and provides the interface use cases
//! draw on.

pub mod random;

pub use random::RandomService;
