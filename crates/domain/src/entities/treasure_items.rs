//! Individual treasure items produced by the result grammars
//!
//! These are simple data structs; containment rules live in the aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::WealthValue;

/// A pile of coins of one denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub amount: u32,
    /// Two-letter currency code as authored, lowercased (e.g. "gp")
    pub denomination: String,
}

impl Coin {
    pub fn new(amount: u32, denomination: impl Into<String>) -> Self {
        Self {
            amount,
            denomination: denomination.into().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.denomination)
    }
}

/// A magic item rolled from a numbered magic item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicItem {
    pub name: String,
    /// Worksheet the item was rolled on, used to look up the full item text
    pub source_worksheet: String,
}

impl MagicItem {
    pub fn new(name: impl Into<String>, source_worksheet: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_worksheet: source_worksheet.into(),
        }
    }
}

impl fmt::Display for MagicItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Magic Item: {} ({})", self.name, self.source_worksheet)
    }
}

/// A gemstone with its description and worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gem {
    pub kind: String,
    pub description: String,
    pub value: WealthValue,
}

impl Gem {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, value: WealthValue) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            value,
        }
    }
}

impl fmt::Display for Gem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gem: {} ({}) worth {}", self.kind, self.description, self.value)
    }
}

/// An art object or other valuable with an example of what it looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuable {
    pub item: String,
    pub example: String,
    pub value: WealthValue,
}

impl Valuable {
    pub fn new(item: impl Into<String>, example: impl Into<String>, value: WealthValue) -> Self {
        Self {
            item: item.into(),
            example: example.into(),
            value,
        }
    }
}

impl fmt::Display for Valuable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Valuable: {} (e.g. {}) worth {}", self.item, self.example, self.value)
    }
}
