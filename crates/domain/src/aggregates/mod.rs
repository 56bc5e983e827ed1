//! Aggregate roots - domain objects that own their related data
//!
//! A [`Treasure`] owns its coins, magic items and other wealth; an
//! [`OtherWealth`] owns its gems and valuables. Mutations that could break a
//! containment rule take a [`Loot`] and reject the wrong kinds, everything else
//! is enforced by the entry enums.

pub mod other_wealth;
pub mod placement;
pub mod treasure;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::{Coin, Gem, MagicItem, Valuable};

pub use other_wealth::{OtherWealth, WealthItem};
pub use placement::{clamp_insert_index, InsertOutcome};
pub use treasure::{Treasure, TreasureEntry};

/// Any item kind a treasure result can contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Loot {
    Coin(Coin),
    MagicItem(MagicItem),
    OtherWealth(OtherWealth),
    Gem(Gem),
    Valuable(Valuable),
}

impl Loot {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Coin(_) => "coin",
            Self::MagicItem(_) => "magic item",
            Self::OtherWealth(_) => "other wealth",
            Self::Gem(_) => "gem",
            Self::Valuable(_) => "valuable",
        }
    }
}

impl fmt::Display for Loot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coin(coin) => write!(f, "{}", coin),
            Self::MagicItem(item) => write!(f, "{}", item),
            Self::OtherWealth(wealth) => write!(f, "{}", wealth),
            Self::Gem(gem) => write!(f, "{}", gem),
            Self::Valuable(valuable) => write!(f, "{}", valuable),
        }
    }
}

impl From<Coin> for Loot {
    fn from(coin: Coin) -> Self {
        Self::Coin(coin)
    }
}

impl From<MagicItem> for Loot {
    fn from(item: MagicItem) -> Self {
        Self::MagicItem(item)
    }
}

impl From<OtherWealth> for Loot {
    fn from(wealth: OtherWealth) -> Self {
        Self::OtherWealth(wealth)
    }
}

impl From<Gem> for Loot {
    fn from(gem: Gem) -> Self {
        Self::Gem(gem)
    }
}

impl From<Valuable> for Loot {
    fn from(valuable: Valuable) -> Self {
        Self::Valuable(valuable)
    }
}

impl From<WealthItem> for Loot {
    fn from(item: WealthItem) -> Self {
        match item {
            WealthItem::Gem(gem) => Self::Gem(gem),
            WealthItem::Valuable(valuable) => Self::Valuable(valuable),
        }
    }
}
