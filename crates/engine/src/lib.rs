//! Hoardgen Engine library.
//!
//! Validates spreadsheet-authored treasure tables and rolls hoards from them.
//!
//! ## Structure
//!
//! - `use_cases/` - Worksheet validation and treasure generation
//! - `repositories/` - Wrappers the use cases draw randomness through
//! - `infrastructure/` - Ports plus config and table loading
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

pub use app::App;
