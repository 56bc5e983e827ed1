//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{ports::RandomPort, random::SystemRandom};
use crate::repositories::RandomService;
use crate::use_cases;

/// Main application state.
///
/// Holds the repository wrappers and every use case, wired once.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repository modules.
pub struct Repositories {
    pub random: RandomService,
}

/// Container for all use cases.
pub struct UseCases {
    pub treasure: use_cases::TreasureUseCases,
    pub validation: use_cases::ValidateTables,
}

impl App {
    /// Create a new App drawing randomness from `random`.
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        let random = RandomService::new(random);

        let generate = Arc::new(use_cases::GenerateTreasure::new(random.clone()));

        Self {
            repositories: Repositories { random },
            use_cases: UseCases {
                treasure: use_cases::TreasureUseCases::new(generate),
                validation: use_cases::ValidateTables::new(),
            },
        }
    }

    /// An App backed by the thread-local system RNG.
    pub fn with_system_random() -> Self {
        Self::new(Arc::new(SystemRandom::new()))
    }
}
