//! Testability port for injecting randomness.

// =============================================================================
// Testability Ports
// =============================================================================

/// Source of uniform random integers.
///
/// Production uses the thread RNG; tests substitute scripted values so every
/// table roll and random choice is reproducible.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform integer in `min..=max`.
    fn gen_range(&self, min: u32, max: u32) -> u32;
}
