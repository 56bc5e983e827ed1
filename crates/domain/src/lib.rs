//! Hoardgen domain layer.
//!
//! Pure data types for table-driven treasure generation: dice, imported
//! worksheet cells, roll-range tables and the treasure aggregates. Nothing here
//! performs I/O or owns a random number generator; dice take their draws from
//! an injected closure.

extern crate self as hoardgen_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use aggregates::{
    clamp_insert_index, InsertOutcome, Loot, OtherWealth, Treasure, TreasureEntry, WealthItem,
};
pub use entities::{
    die_size_from_header, parse_span, Cell, Column, Coin, Gem, MagicItem, RangeRow, RangeTable,
    RequiredTables, TableSet, TabularData, Valuable,
};
pub use error::DomainError;
pub use value_objects::{
    ChallengeRating, Denomination, DiceError, Die, RollMode, WealthValue, MAX_CHALLENGE_RATING,
};
