//! Challenge rating value object
//!
//! Treasure tables are keyed by challenge rating ranges. The fractional
//! ratings collapse onto the integer scale used by worksheet titles.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Highest rating a table title can address; "41+" maps here.
pub const MAX_CHALLENGE_RATING: u32 = 41;

/// A requested challenge rating, normalised to the integer table scale.
///
/// | Token           | Scale |
/// |-----------------|-------|
/// | `0`, `1/8`      | 0     |
/// | `1/4`, `1/2`    | 1     |
/// | `1` .. `40`     | same  |
/// | `41+`           | 41    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChallengeRating(u32);

impl ChallengeRating {
    /// Parse one of the literal CR tokens offered to the user.
    pub fn parse(token: &str) -> Result<Self, DomainError> {
        let token = token.trim();
        let value = match token {
            "0" | "1/8" => 0,
            "1/4" | "1/2" => 1,
            "41+" => MAX_CHALLENGE_RATING,
            other => {
                let n: u32 = other.parse().map_err(|_| {
                    DomainError::parse(format!("Unknown challenge rating: {}", other))
                })?;
                if !(1..MAX_CHALLENGE_RATING).contains(&n) {
                    return Err(DomainError::parse(format!(
                        "Challenge rating out of range: {}",
                        other
                    )));
                }
                n
            }
        };
        Ok(Self(value))
    }

    /// The integer used when matching worksheet CR ranges.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == MAX_CHALLENGE_RATING {
            write!(f, "{}+", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl std::str::FromStr for ChallengeRating {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
