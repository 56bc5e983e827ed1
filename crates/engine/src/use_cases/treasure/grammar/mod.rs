//! Result-text grammars.
//!
//! A matched row's result text is a `", "`-separated list of entries. Each
//! grammar parses every entry independently; one bad entry fails the whole
//! text so nothing is ever partially applied.

pub mod coin;
pub mod magic_item;
pub mod other_wealth;

use hoardgen_domain::{DiceError, Die};
use thiserror::Error;

pub use coin::{parse_coin_text, CoinEntry};
pub use magic_item::{parse_magic_item_text, MagicItemEntry};
pub use other_wealth::{parse_wealth_text, WealthCategory, WealthEntry};

/// Result texts that mean "this roll produced nothing".
const EMPTY_RESULTS: &[&str] = &["", "-", "none", "nothing", "no coins", "no treasure"];

/// A grammar violation in one entry of a result text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("malformed entry '{entry}': {reason}")]
    MalformedEntry { entry: String, reason: String },

    #[error("currency '{0}' appears more than once")]
    DuplicateCurrency(String),

    #[error("invalid dice in '{entry}': {source}")]
    Dice {
        entry: String,
        #[source]
        source: DiceError,
    },
}

impl GrammarError {
    fn malformed(entry: &str, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }
}

/// True when `text` is one of the neutral "nothing here" results.
pub fn is_empty_result(text: &str) -> bool {
    let lower = text.trim().to_ascii_lowercase();
    EMPTY_RESULTS.contains(&lower.as_str())
}

/// Split a result text into its entries.
pub fn split_entries(text: &str) -> Vec<&str> {
    text.split(", ")
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Parse an integer that may carry thousands separators ("1,000").
pub fn parse_amount(token: &str) -> Option<u32> {
    token.trim().replace(',', "").parse().ok()
}

/// How many times an entry repeats: a literal number or dice to roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountToken {
    Literal(u32),
    Dice(Die),
}

impl CountToken {
    /// Parse `3`, `2d4` or `(2d4)`.
    pub fn parse(token: &str, entry: &str) -> Result<Self, GrammarError> {
        let token = token.trim().trim_start_matches('(').trim_end_matches(')');
        if let Some(n) = parse_amount(token) {
            return Ok(Self::Literal(n));
        }
        Die::parse(token)
            .map(Self::Dice)
            .map_err(|source| GrammarError::Dice {
                entry: entry.to_string(),
                source,
            })
    }
}
