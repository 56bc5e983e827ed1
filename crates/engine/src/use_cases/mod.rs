//! Use cases - User story orchestration.
//!
//! `validation` gates which tables may be used; `treasure` rolls a hoard from
//! them.

pub mod treasure;
pub mod validation;

pub use treasure::{GenerateTreasure, TreasureRequest, TreasureUseCases};
pub use validation::{ValidateTables, ValidationReport};
