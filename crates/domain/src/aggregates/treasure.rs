//! Treasure aggregate - one generated hoard

use serde::{Deserialize, Serialize};
use std::fmt;

use super::other_wealth::OtherWealth;
use super::placement::{clamp_insert_index, InsertOutcome};
use super::Loot;
use crate::entities::{Coin, MagicItem};
use crate::error::DomainError;

/// A top-level hoard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreasureEntry {
    Coin(Coin),
    MagicItem(MagicItem),
    OtherWealth(OtherWealth),
}

impl TreasureEntry {
    /// Logical item count: other wealth counts its contents.
    pub fn item_count(&self) -> usize {
        match self {
            Self::Coin(_) | Self::MagicItem(_) => 1,
            Self::OtherWealth(wealth) => wealth.len(),
        }
    }
}

impl fmt::Display for TreasureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coin(coin) => write!(f, "Coins: {}", coin),
            Self::MagicItem(item) => write!(f, "{}", item),
            Self::OtherWealth(wealth) => write!(f, "{}", wealth),
        }
    }
}

impl TryFrom<Loot> for TreasureEntry {
    type Error = DomainError;

    fn try_from(loot: Loot) -> Result<Self, Self::Error> {
        match loot {
            Loot::Coin(coin) => Ok(Self::Coin(coin)),
            Loot::MagicItem(item) => Ok(Self::MagicItem(item)),
            Loot::OtherWealth(wealth) => Ok(Self::OtherWealth(wealth)),
            other => Err(DomainError::constraint(format!(
                "a {} must be wrapped in other wealth before joining a treasure",
                other.kind_name()
            ))),
        }
    }
}

/// A generated hoard.
///
/// # Invariants
///
/// - Top-level entries are coins, magic items or other wealth, never bare
///   gems or valuables (enforced by [`TreasureEntry`])
/// - The treasure owns every item; nothing points back at source tables
///
/// # Example
///
/// ```
/// use hoardgen_domain::{Coin, Treasure};
///
/// let mut treasure = Treasure::new();
/// treasure.add(Coin::new(12, "gp"), None).unwrap();
/// assert_eq!(treasure.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasure {
    entries: Vec<TreasureEntry>,
}

impl Treasure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, optionally at `index`.
    ///
    /// Bare gems and valuables are rejected. An index past the end appends;
    /// the returned outcome says so.
    pub fn add(
        &mut self,
        item: impl Into<Loot>,
        index: Option<usize>,
    ) -> Result<InsertOutcome, DomainError> {
        let entry = TreasureEntry::try_from(item.into())?;
        let outcome = clamp_insert_index(self.entries.len(), index);
        self.entries.insert(outcome.position(), entry);
        Ok(outcome)
    }

    /// Remove the entry at `index`. Returns false when out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    /// Replace the entry at `index`. Returns `Ok(false)` when out of range.
    pub fn replace(&mut self, index: usize, item: impl Into<Loot>) -> Result<bool, DomainError> {
        let entry = TreasureEntry::try_from(item.into())?;
        match self.entries.get_mut(index) {
            Some(slot) => {
                *slot = entry;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn entries(&self) -> &[TreasureEntry] {
        &self.entries
    }

    pub fn coins(&self) -> impl Iterator<Item = &Coin> {
        self.entries.iter().filter_map(|entry| match entry {
            TreasureEntry::Coin(coin) => Some(coin),
            _ => None,
        })
    }

    pub fn magic_items(&self) -> impl Iterator<Item = &MagicItem> {
        self.entries.iter().filter_map(|entry| match entry {
            TreasureEntry::MagicItem(item) => Some(item),
            _ => None,
        })
    }

    pub fn other_wealth(&self) -> impl Iterator<Item = &OtherWealth> {
        self.entries.iter().filter_map(|entry| match entry {
            TreasureEntry::OtherWealth(wealth) => Some(wealth),
            _ => None,
        })
    }

    /// Number of top-level entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Flattened item count: other wealth contributes each gem and valuable.
    pub fn len(&self) -> usize {
        self.entries.iter().map(TreasureEntry::item_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Treasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "Nothing");
        }
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
