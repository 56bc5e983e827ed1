//! Coin grammar.
//!
//! `AMOUNT (NdM [x MULTIPLIER]) CUR`, e.g. `"900 (2d8 x 100) gp"`. The leading
//! amount is the table author's average and is display-only; the coins
//! actually found are `roll(NdM) * MULTIPLIER`.

use std::collections::HashSet;
use std::sync::OnceLock;

use hoardgen_domain::{Coin, Die};

use super::{parse_amount, split_entries, GrammarError};

static COIN_ENTRY_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();

fn coin_entry_regex() -> &'static regex_lite::Regex {
    COIN_ENTRY_REGEX.get_or_init(|| {
        regex_lite::Regex::new(
            r"^([\d,]+)\s*\(\s*(\d+\s*[dD]\s*\d+)\s*(?:[xX*]\s*([\d,]+)\s*)?\)\s*([A-Za-z]{2})$",
        )
        .expect("COIN_ENTRY_REGEX pattern is invalid")
    })
}

/// One parsed coin entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinEntry {
    /// The author's display amount, not used for the yield
    pub listed_amount: u32,
    pub dice: Die,
    pub multiplier: u32,
    /// Lowercased two-letter currency code
    pub currency: String,
}

impl CoinEntry {
    /// Turn a roll of [`dice`](Self::dice) into coins.
    pub fn coin(&self, rolled: u32) -> Coin {
        Coin::new(rolled.saturating_mul(self.multiplier), self.currency.clone())
    }

    fn parse(entry: &str) -> Result<Self, GrammarError> {
        let caps = coin_entry_regex()
            .captures(entry)
            .ok_or_else(|| GrammarError::malformed(entry, "expected 'AMOUNT (NdM [x N]) CUR'"))?;

        let listed_amount = parse_amount(&caps[1])
            .ok_or_else(|| GrammarError::malformed(entry, "amount is not an integer"))?;
        let dice_expr: String = caps[2].chars().filter(|c| !c.is_whitespace()).collect();
        let dice = Die::parse(&dice_expr).map_err(|source| GrammarError::Dice {
            entry: entry.to_string(),
            source,
        })?;
        let multiplier = match caps.get(3) {
            Some(m) => parse_amount(m.as_str())
                .ok_or_else(|| GrammarError::malformed(entry, "multiplier is not an integer"))?,
            None => 1,
        };
        Ok(Self {
            listed_amount,
            dice,
            multiplier,
            currency: caps[4].to_ascii_lowercase(),
        })
    }
}

/// Parse a full coin result text.
///
/// Fails on the first malformed entry, or when two entries share a currency.
pub fn parse_coin_text(text: &str) -> Result<Vec<CoinEntry>, GrammarError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for raw in split_entries(text) {
        let entry = CoinEntry::parse(raw)?;
        if !seen.insert(entry.currency.clone()) {
            return Err(GrammarError::DuplicateCurrency(entry.currency));
        }
        entries.push(entry);
    }
    Ok(entries)
}
