//! Dice value objects and parsing
//!
//! Supports plain "NdM" expressions as they appear inside treasure table cells,
//! plus the richer [`Die`] model used for advantage/disadvantage and
//! drop-highest/drop-lowest rolls.
//!
//! Randomness is injected by the caller as a closure that returns a uniform
//! value in `1..=faces`, so the domain layer never owns an RNG.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error when constructing or parsing dice
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// The die parameters violate the die invariants
    #[error("Invalid die: {0}")]
    InvalidDie(String),
    /// The expression is not of the form NdM
    #[error("Malformed dice expression: {0}")]
    MalformedExpression(String),
}

/// How each individual die is rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    /// One draw per die
    #[default]
    Normal,
    /// Two draws per die, keep the higher
    Advantage,
    /// Two draws per die, keep the lower
    Disadvantage,
}

impl fmt::Display for RollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Advantage => write!(f, "advantage"),
            Self::Disadvantage => write!(f, "disadvantage"),
        }
    }
}

impl std::str::FromStr for RollMode {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "advantage" => Ok(Self::Advantage),
            "disadvantage" => Ok(Self::Disadvantage),
            other => Err(DiceError::InvalidDie(format!("unknown roll mode '{}'", other))),
        }
    }
}

/// Most dice a single expression may roll.
pub const MAX_DICE_COUNT: u32 = 1_000;

/// Largest die size accepted. Together with [`MAX_DICE_COUNT`] this keeps
/// every total inside `u32`.
pub const MAX_DIE_FACES: u32 = 1_000_000;

/// A set of identical dice, e.g. "4d6 drop lowest".
///
/// # Invariants
///
/// - `1 < faces <= MAX_DIE_FACES`
/// - `1 <= count <= MAX_DICE_COUNT`
/// - `drop_count < count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Die {
    faces: u32,
    count: u32,
    mode: RollMode,
    drop_count: u32,
    /// When true the lowest `drop_count` values are discarded (the highest are kept)
    drop_lowest: bool,
}

impl Die {
    /// Create a die set, validating every invariant.
    ///
    /// `drop_lowest == true` discards the lowest `drop_count` values, otherwise
    /// the highest `drop_count` values are discarded.
    pub fn new(
        faces: u32,
        count: u32,
        mode: RollMode,
        drop_count: u32,
        drop_lowest: bool,
    ) -> Result<Self, DiceError> {
        if faces <= 1 {
            return Err(DiceError::InvalidDie(format!(
                "faces must be greater than 1, got {}",
                faces
            )));
        }
        if faces > MAX_DIE_FACES {
            return Err(DiceError::InvalidDie(format!(
                "faces must be at most {}, got {}",
                MAX_DIE_FACES, faces
            )));
        }
        if count < 1 {
            return Err(DiceError::InvalidDie(
                "count must be at least 1".to_string(),
            ));
        }
        if count > MAX_DICE_COUNT {
            return Err(DiceError::InvalidDie(format!(
                "count must be at most {}, got {}",
                MAX_DICE_COUNT, count
            )));
        }
        if drop_count >= count {
            return Err(DiceError::InvalidDie(format!(
                "drop count {} must be less than dice count {}",
                drop_count, count
            )));
        }
        Ok(Self {
            faces,
            count,
            mode,
            drop_count,
            drop_lowest,
        })
    }

    /// A single die of the given size rolled normally (e.g. the d20 of a table).
    pub fn single(faces: u32) -> Result<Self, DiceError> {
        Self::new(faces, 1, RollMode::Normal, 0, true)
    }

    /// Parse an "NdM" expression.
    ///
    /// Always yields a normal roll with nothing dropped. Surrounding whitespace
    /// and parentheses are tolerated, so "(2d4)" parses like "2d4".
    pub fn parse(input: &str) -> Result<Self, DiceError> {
        let input = input
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim()
            .to_ascii_lowercase();
        if input.is_empty() {
            return Err(DiceError::MalformedExpression("empty expression".to_string()));
        }

        // Find 'd' separator
        let d_pos = input.find('d').ok_or_else(|| {
            DiceError::MalformedExpression(format!("missing 'd' separator in '{}'", input))
        })?;

        let count_str = &input[..d_pos];
        let faces_str = &input[d_pos + 1..];

        let count: u32 = count_str.parse().map_err(|_| {
            DiceError::MalformedExpression(format!("invalid dice count '{}'", count_str))
        })?;
        let faces: u32 = faces_str.parse().map_err(|_| {
            DiceError::MalformedExpression(format!("invalid die size '{}'", faces_str))
        })?;

        Self::new(faces, count, RollMode::Normal, 0, true)
    }

    pub fn faces(&self) -> u32 {
        self.faces
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn mode(&self) -> RollMode {
        self.mode
    }

    pub fn drop_count(&self) -> u32 {
        self.drop_count
    }

    pub fn drops_lowest(&self) -> bool {
        self.drop_lowest
    }

    /// Return a copy rolled with the given mode.
    pub fn with_mode(mut self, mode: RollMode) -> Self {
        self.mode = mode;
        self
    }

    /// Smallest total this die set can produce.
    pub fn min_roll(&self) -> u32 {
        self.count - self.drop_count
    }

    /// Largest total this die set can produce.
    pub fn max_roll(&self) -> u32 {
        (self.count - self.drop_count) * self.faces
    }

    /// Roll the dice.
    ///
    /// `draw` must return a uniform value in `1..=faces` for the `faces` it is
    /// given. It is called once per die under a normal roll and twice per die
    /// under advantage or disadvantage.
    pub fn roll_with<F>(&self, mut draw: F) -> u32
    where
        F: FnMut(u32) -> u32,
    {
        let mut kept: Vec<u32> = (0..self.count)
            .map(|_| match self.mode {
                RollMode::Normal => draw(self.faces),
                RollMode::Advantage => {
                    let first = draw(self.faces);
                    let second = draw(self.faces);
                    first.max(second)
                }
                RollMode::Disadvantage => {
                    let first = draw(self.faces);
                    let second = draw(self.faces);
                    first.min(second)
                }
            })
            .collect();

        kept.sort_unstable();
        let drop = self.drop_count as usize;
        let remaining = if drop == 0 {
            &kept[..]
        } else if self.drop_lowest {
            &kept[drop..]
        } else {
            &kept[..kept.len() - drop]
        };
        remaining.iter().sum()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.faces)?;
        if self.drop_count > 0 {
            let which = if self.drop_lowest { "lowest" } else { "highest" };
            write!(f, " drop {} {}", which, self.drop_count)?;
        }
        if self.mode != RollMode::Normal {
            write!(f, " ({})", self.mode)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Die {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
