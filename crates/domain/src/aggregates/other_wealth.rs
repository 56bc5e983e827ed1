//! Other wealth aggregate - gems and valuables found together

use serde::{Deserialize, Serialize};
use std::fmt;

use super::placement::{clamp_insert_index, InsertOutcome};
use super::Loot;
use crate::entities::{Gem, Valuable};
use crate::error::DomainError;

/// A gem or a valuable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WealthItem {
    Gem(Gem),
    Valuable(Valuable),
}

impl fmt::Display for WealthItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gem(gem) => write!(f, "{}", gem),
            Self::Valuable(valuable) => write!(f, "{}", valuable),
        }
    }
}

impl TryFrom<Loot> for WealthItem {
    type Error = DomainError;

    fn try_from(loot: Loot) -> Result<Self, Self::Error> {
        match loot {
            Loot::Gem(gem) => Ok(Self::Gem(gem)),
            Loot::Valuable(valuable) => Ok(Self::Valuable(valuable)),
            other => Err(DomainError::constraint(format!(
                "other wealth holds only gems and valuables, not {}",
                other.kind_name()
            ))),
        }
    }
}

/// An ordered collection of gems and valuables.
///
/// # Invariants
///
/// - Only `Gem` and `Valuable` entries, enforced by [`WealthItem`]
/// - Insertion order is preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherWealth {
    items: Vec<WealthItem>,
}

impl OtherWealth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gem or valuable, optionally at `index`.
    ///
    /// Anything else is a type-contract violation. An index past the end
    /// appends; see [`clamp_insert_index`].
    pub fn add(
        &mut self,
        item: impl Into<Loot>,
        index: Option<usize>,
    ) -> Result<InsertOutcome, DomainError> {
        let item = WealthItem::try_from(item.into())?;
        let outcome = clamp_insert_index(self.items.len(), index);
        self.items.insert(outcome.position(), item);
        Ok(outcome)
    }

    /// Remove the entry at `index`. Returns false when out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    /// Replace the entry at `index`. Returns `Ok(false)` when out of range.
    pub fn replace(&mut self, index: usize, item: impl Into<Loot>) -> Result<bool, DomainError> {
        let item = WealthItem::try_from(item.into())?;
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = item;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn items(&self) -> &[WealthItem] {
        &self.items
    }

    pub fn gems(&self) -> impl Iterator<Item = &Gem> {
        self.items.iter().filter_map(|item| match item {
            WealthItem::Gem(gem) => Some(gem),
            WealthItem::Valuable(_) => None,
        })
    }

    pub fn valuables(&self) -> impl Iterator<Item = &Valuable> {
        self.items.iter().filter_map(|item| match item {
            WealthItem::Valuable(valuable) => Some(valuable),
            WealthItem::Gem(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for OtherWealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Other Wealth:")?;
        for item in &self.items {
            write!(f, "\n    {}", item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Coin;
    use crate::value_objects::{Denomination, WealthValue};

    fn gem(kind: &str) -> Gem {
        Gem::new(kind, "shiny", WealthValue::new(10, Denomination::Gold))
    }

    fn valuable(item: &str) -> Valuable {
        Valuable::new(item, "silver ewer", WealthValue::new(25, Denomination::Gold))
    }

    #[test]
    fn test_add_accepts_gem_and_valuable() {
        let mut wealth = OtherWealth::new();
        assert!(wealth.add(gem("Azurite"), None).is_ok());
        assert!(wealth.add(valuable("Ewer"), None).is_ok());
        assert_eq!(wealth.len(), 2);
        assert_eq!(wealth.gems().count(), 1);
        assert_eq!(wealth.valuables().count(), 1);
    }

    #[test]
    fn test_add_rejects_coin() {
        let mut wealth = OtherWealth::new();
        let result = wealth.add(Coin::new(5, "gp"), None);
        assert!(matches!(result, Err(DomainError::Constraint(_))));
        assert!(wealth.is_empty());
    }

    #[test]
    fn test_add_at_index_and_clamped() {
        let mut wealth = OtherWealth::new();
        wealth.add(gem("A"), None).unwrap();
        wealth.add(gem("B"), Some(0)).unwrap();
        let outcome = wealth.add(gem("C"), Some(10)).unwrap();
        assert!(outcome.was_clamped());
        let kinds: Vec<&str> = wealth.gems().map(|g| g.kind.as_str()).collect();
        assert_eq!(kinds, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_remove_and_replace_bounds() {
        let mut wealth = OtherWealth::new();
        wealth.add(gem("A"), None).unwrap();
        assert!(!wealth.remove(1));
        assert_eq!(wealth.len(), 1);
        assert!(!wealth.replace(3, gem("B")).unwrap());
        assert!(wealth.replace(0, valuable("Idol")).unwrap());
        assert_eq!(wealth.valuables().count(), 1);
        assert!(wealth.remove(0));
        assert!(wealth.is_empty());
    }
}
