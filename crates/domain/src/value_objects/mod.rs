//! Value objects - Immutable objects defined by their attributes

mod challenge_rating;
mod denomination;
mod dice;

pub use challenge_rating::{ChallengeRating, MAX_CHALLENGE_RATING};
pub use denomination::{Denomination, WealthValue};
pub use dice::{DiceError, Die, RollMode, MAX_DICE_COUNT, MAX_DIE_FACES};
