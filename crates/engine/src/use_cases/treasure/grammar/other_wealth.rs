//! Gem and valuable grammar.
//!
//! Two entry shapes:
//!
//! - `VALUE CUR TYPE`, one item, e.g. `"50 gp gems"`
//! - `COUNT (NdM) VALUE CUR TYPE`, several items, e.g. `"7 (2d6) 10 gp gems"`
//!
//! As with coins, the leading COUNT is the author's average; the parenthesised
//! token decides how many items are drawn.

use std::fmt;

use hoardgen_domain::{Denomination, WealthValue};

use super::{parse_amount, split_entries, CountToken, GrammarError};

/// Which family of worksheets an entry draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WealthCategory {
    Gem,
    Valuable,
}

impl WealthCategory {
    /// Pick the category from an entry's TYPE word(s).
    pub fn from_type_label(label: &str) -> Self {
        if label.to_ascii_lowercase().contains("valuable") {
            Self::Valuable
        } else {
            Self::Gem
        }
    }

    /// Substring identifying this category's workbooks.
    pub fn workbook_keyword(&self) -> &'static str {
        match self {
            Self::Gem => "gem",
            Self::Valuable => "valuable",
        }
    }

    /// Marker splitting a one-column result into name and detail.
    pub fn detail_marker(&self) -> &'static str {
        match self {
            Self::Gem => " Desc: ",
            Self::Valuable => " Ex: ",
        }
    }
}

impl fmt::Display for WealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gem => write!(f, "gems"),
            Self::Valuable => write!(f, "valuables"),
        }
    }
}

/// One parsed gem/valuable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WealthEntry {
    pub count: CountToken,
    pub value: u32,
    /// Lowercased two-letter currency code
    pub currency: String,
    pub category: WealthCategory,
}

impl WealthEntry {
    /// Value carried by every item this entry produces.
    pub fn wealth_value(&self) -> WealthValue {
        WealthValue::new(self.value, Denomination::from_code(&self.currency))
    }

    /// True when a worksheet title encodes this entry's `VALUE CUR` pair.
    ///
    /// Matching is on whole words, so `10 gp` never matches `100 gp`.
    pub fn matches_title(&self, title: &str) -> bool {
        let words: Vec<String> = title
            .split_whitespace()
            .map(|w| w.replace(',', "").to_ascii_lowercase())
            .collect();
        let value = self.value.to_string();
        words
            .windows(2)
            .any(|pair| pair[0] == value && pair[1] == self.currency)
    }

    fn parse(entry: &str) -> Result<Self, GrammarError> {
        let tokens: Vec<&str> = entry.split_whitespace().collect();
        let (count, rest) = match tokens.as_slice() {
            [_, _, _] => (CountToken::Literal(1), &tokens[..]),
            [listed, dice, _, _, _, ..] if dice.starts_with('(') && dice.ends_with(')') => {
                parse_amount(listed)
                    .ok_or_else(|| GrammarError::malformed(entry, "count is not an integer"))?;
                (CountToken::parse(dice, entry)?, &tokens[2..])
            }
            _ => {
                return Err(GrammarError::malformed(
                    entry,
                    "expected 'VALUE CUR TYPE' or 'COUNT (NdM) VALUE CUR TYPE'",
                ))
            }
        };

        let value = parse_amount(rest[0])
            .ok_or_else(|| GrammarError::malformed(entry, "value is not an integer"))?;
        let currency = rest[1];
        if currency.len() != 2 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GrammarError::malformed(
                entry,
                "currency must be a two-letter code",
            ));
        }
        let type_label = rest[2..].join(" ");

        Ok(Self {
            count,
            value,
            currency: currency.to_ascii_lowercase(),
            category: WealthCategory::from_type_label(&type_label),
        })
    }
}

/// Parse a full gem/valuable result text.
pub fn parse_wealth_text(text: &str) -> Result<Vec<WealthEntry>, GrammarError> {
    split_entries(text)
        .into_iter()
        .map(WealthEntry::parse)
        .collect()
}

/// Split a rolled row into the item name and its description/example.
///
/// Three-column worksheets carry the detail in their own column; otherwise
/// the text is split on the category's marker.
pub fn split_detail(category: WealthCategory, text: &str, text2: Option<&str>) -> (String, String) {
    if let Some(detail) = text2 {
        return (text.trim().to_string(), detail.trim().to_string());
    }
    match text.split_once(category.detail_marker()) {
        Some((name, detail)) => (name.trim().to_string(), detail.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_item() {
        let entries = parse_wealth_text("50 gp gems").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].count, CountToken::Literal(1));
        assert_eq!(entries[0].value, 50);
        assert_eq!(entries[0].currency, "gp");
        assert_eq!(entries[0].category, WealthCategory::Gem);
    }

    #[test]
    fn test_multiple_items_and_categories() {
        let entries = parse_wealth_text("7 (2d6) 10 gp gems, 2 (1d4) 25 gp valuables").unwrap();
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0].count, CountToken::Dice(die) if die.faces() == 6));
        assert_eq!(entries[1].category, WealthCategory::Valuable);
        assert_eq!(entries[1].value, 25);
    }

    #[test]
    fn test_multi_word_type() {
        let entries = parse_wealth_text("2 (1d4) 250 gp art object valuables").unwrap();
        assert_eq!(entries[0].category, WealthCategory::Valuable);
    }

    #[test]
    fn test_malformed_entries() {
        assert!(parse_wealth_text("a few gems").is_err());
        assert!(parse_wealth_text("50 gp").is_err());
        assert!(parse_wealth_text("7 2d6 10 gp gems").is_err());
        assert!(parse_wealth_text("50 gold gems").is_err());
        assert!(parse_wealth_text("50 gp gems, oops").is_err());
    }

    #[test]
    fn test_wealth_value_denomination() {
        let entry = &parse_wealth_text("10 pp gems").unwrap()[0];
        assert_eq!(entry.wealth_value(), WealthValue::new(10, Denomination::Platinum));
        let entry = &parse_wealth_text("10 zz gems").unwrap()[0];
        assert_eq!(entry.wealth_value().denomination, Denomination::Gold);
    }

    #[test]
    fn test_matches_title_on_whole_words() {
        let entry = &parse_wealth_text("10 gp gems").unwrap()[0];
        assert!(entry.matches_title("10 gp Gems"));
        assert!(entry.matches_title("Gemstones 10 GP"));
        assert!(!entry.matches_title("100 gp Gems"));
        assert!(!entry.matches_title("10 sp Gems"));
    }

    #[test]
    fn test_split_detail() {
        assert_eq!(
            split_detail(WealthCategory::Gem, "Azurite Desc: opaque blue", None),
            ("Azurite".to_string(), "opaque blue".to_string())
        );
        assert_eq!(
            split_detail(WealthCategory::Valuable, "Silver ewer Ex: engraved", None),
            ("Silver ewer".to_string(), "engraved".to_string())
        );
        assert_eq!(
            split_detail(WealthCategory::Gem, "Azurite", Some("opaque blue")),
            ("Azurite".to_string(), "opaque blue".to_string())
        );
        assert_eq!(
            split_detail(WealthCategory::Gem, "Azurite", None),
            ("Azurite".to_string(), String::new())
        );
    }
}
