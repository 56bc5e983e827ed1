//! Worksheet resolution.
//!
//! Main treasure worksheets are titled `"<anything> <CR range> <Category>"`,
//! for example `"Treasure For CRs 1-2 Coin"`. Magic item sub-tables are named
//! after their workbook plus a table number.

use std::fmt;
use std::str::FromStr;

use hoardgen_domain::{parse_span, DomainError, RequiredTables};

/// The three kinds of main treasure worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TreasureCategory {
    Coin,
    Magic,
    Other,
}

impl TreasureCategory {
    pub fn all() -> [Self; 3] {
        [Self::Coin, Self::Magic, Self::Other]
    }

    /// The lowercased last word of worksheet titles for this category.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Coin => "coin",
            Self::Magic => "magic",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TreasureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for TreasureCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coin" | "coins" => Ok(Self::Coin),
            "magic" => Ok(Self::Magic),
            "other" => Ok(Self::Other),
            other => Err(DomainError::parse(format!(
                "unknown treasure category '{}'",
                other
            ))),
        }
    }
}

/// Read the CR band and category out of a worksheet title.
fn title_band(title: &str) -> Option<(u32, u32, String)> {
    let words: Vec<&str> = title.split_whitespace().collect();
    let [.., range, category] = words.as_slice() else {
        return None;
    };
    let (low, high) = parse_span(range.trim_end_matches('+'))?;
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    Some((low, high, category.to_ascii_lowercase()))
}

/// First title in `titles` covering `cr` for `category`.
pub fn resolve_worksheet<'a, S: AsRef<str>>(
    category: TreasureCategory,
    cr: u32,
    titles: &'a [S],
) -> Option<&'a str> {
    titles.iter().map(|title| title.as_ref()).find(|title| {
        matches!(
            title_band(title),
            Some((low, high, ref token)) if token == category.token() && (low..=high).contains(&cr)
        )
    })
}

/// A resolved main worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWorksheet<'a> {
    pub workbook: &'a str,
    pub worksheet: &'a str,
}

/// Resolve across every required workbook, in workbook-name order.
pub fn resolve_in_required(
    category: TreasureCategory,
    cr: u32,
    required: &RequiredTables,
) -> Option<ResolvedWorksheet<'_>> {
    required.iter().find_map(|(workbook, titles)| {
        resolve_worksheet(category, cr, titles.as_slice()).map(|worksheet| ResolvedWorksheet {
            workbook: workbook.as_str(),
            worksheet,
        })
    })
}

/// Drop a 3-4 character file extension such as `.xlsx`.
pub fn strip_extension(workbook: &str) -> &str {
    match workbook.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (3..=4).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => workbook,
    }
}

/// Worksheet holding magic item table `number` within `workbook`.
pub fn magic_item_worksheet_name(workbook: &str, number: u32) -> String {
    format!("{} {}", strip_extension(workbook), number)
}
