//! Coin denominations

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five standard coin denominations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    Platinum,
    Electrum,
    Gold,
    Silver,
    Copper,
}

impl Denomination {
    /// Map a two-letter currency code to a denomination.
    ///
    /// Unknown codes fall back to gold, which is how value columns in gem and
    /// valuable tables are read.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "pp" => Self::Platinum,
            "ep" => Self::Electrum,
            "sp" => Self::Silver,
            "cp" => Self::Copper,
            _ => Self::Gold,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Platinum => "pp",
            Self::Electrum => "ep",
            Self::Gold => "gp",
            Self::Silver => "sp",
            Self::Copper => "cp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Platinum => "platinum",
            Self::Electrum => "electrum",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Copper => "copper",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A monetary value such as "50 gold", attached to gems and valuables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WealthValue {
    pub amount: u32,
    pub denomination: Denomination,
}

impl WealthValue {
    pub fn new(amount: u32, denomination: Denomination) -> Self {
        Self {
            amount,
            denomination,
        }
    }
}

impl fmt::Display for WealthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.denomination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(Denomination::from_code("pp"), Denomination::Platinum);
        assert_eq!(Denomination::from_code("EP"), Denomination::Electrum);
        assert_eq!(Denomination::from_code("gp"), Denomination::Gold);
        assert_eq!(Denomination::from_code("sp"), Denomination::Silver);
        assert_eq!(Denomination::from_code("cp"), Denomination::Copper);
    }

    #[test]
    fn test_unknown_code_defaults_to_gold() {
        assert_eq!(Denomination::from_code("zz"), Denomination::Gold);
    }

    #[test]
    fn test_value_display() {
        let value = WealthValue::new(50, Denomination::Gold);
        assert_eq!(value.to_string(), "50 gold");
    }
}
