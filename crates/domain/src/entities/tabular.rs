//! Tabular worksheet data as handed over by the spreadsheet import layer
//!
//! A worksheet is an ordered list of named columns whose cells are aligned by
//! row. Cells are parsed into [`Cell`] once, when they cross the import
//! boundary, so range and grammar logic never re-infers cell shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder strings authors use for an intentionally empty cell.
const BLANK_MARKERS: &[&str] = &["", "-", "\u{2013}", "\u{2014}"];

/// A single worksheet cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// A bare integer, e.g. `7`
    Integer(i64),
    /// An inclusive `m-n` range with `m < n`
    Range(u32, u32),
    /// Missing value or a placeholder dash
    Blank,
    /// Anything else, kept verbatim (trimmed)
    Text(String),
}

impl Cell {
    /// Classify a raw string cell.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if BLANK_MARKERS.contains(&trimmed) {
            return Self::Blank;
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return Self::Integer(n);
        }
        match parse_span(trimmed) {
            Some((low, high)) if low < high => Self::Range(low, high),
            Some((low, high)) if low == high => Self::Integer(i64::from(low)),
            _ => Self::Text(trimmed.to_string()),
        }
    }

    /// Classify a raw numeric cell. Fractional parts are truncated.
    pub fn from_number(value: f64) -> Self {
        if value.is_finite() {
            Self::Integer(value.trunc() as i64)
        } else {
            Self::Blank
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// The inclusive roll interval this cell covers, if it is a roll cell.
    ///
    /// Zero and negative integers are never valid rolls.
    pub fn roll_span(&self) -> Option<(u32, u32)> {
        match self {
            Self::Integer(n) if *n >= 1 => u32::try_from(*n).ok().map(|v| (v, v)),
            Self::Range(low, high) if *low >= 1 => Some((*low, *high)),
            _ => None,
        }
    }

    /// The cell rendered as result text; blank cells have none.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Blank => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Range(low, high) => write!(f, "{}-{}", low, high),
            Self::Blank => Ok(()),
            Self::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Blank)
    }
}

/// Parse `m` or `m-n` into `(m, n)` without reordering.
///
/// Returns `None` for anything that is not one or two non-negative integers
/// joined by a single dash. Callers decide how to treat `m > n`: the worksheet
/// validator rejects it, title matching swaps it.
pub fn parse_span(s: &str) -> Option<(u32, u32)> {
    let s = s.trim();
    let mut parts = s.split('-');
    let low: u32 = parts.next()?.trim().parse().ok()?;
    match (parts.next(), parts.next()) {
        (None, _) => Some((low, low)),
        (Some(high), None) => Some((low, high.trim().parse().ok()?)),
        _ => None,
    }
}

/// Extract the die size from a roll column header such as `d20` or `Roll (d100)`.
///
/// The whole digit run after the `d` is taken, so `d100` is never read as
/// `d10`. Returns `None` when no `d<N>` token with `N > 1` is present.
pub fn die_size_from_header(header: &str) -> Option<u32> {
    let lower = header.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    for (idx, byte) in bytes.iter().enumerate() {
        if *byte != b'd' {
            continue;
        }
        if idx > 0 && bytes[idx - 1].is_ascii_alphabetic() {
            continue;
        }
        let digits: String = lower[idx + 1..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(size) = digits.parse::<u32>() {
            if size > 1 {
                return Some(size);
            }
        }
    }
    None
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// One worksheet as materialised by the import layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularData {
    pub columns: Vec<Column>,
}

impl TabularData {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Build a two-column worksheet from `(roll, result)` pairs.
    pub fn two_column<R, T>(roll_header: &str, result_header: &str, rows: Vec<(R, T)>) -> Self
    where
        R: Into<Cell>,
        T: Into<Cell>,
    {
        let (rolls, results): (Vec<Cell>, Vec<Cell>) = rows
            .into_iter()
            .map(|(roll, result)| (roll.into(), result.into()))
            .unzip();
        Self::new(vec![
            Column::new(roll_header, rolls),
            Column::new(result_header, results),
        ])
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, taken from the longest column.
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }

    pub fn header(&self, column: usize) -> Option<&str> {
        self.columns.get(column).map(|c| c.name.as_str())
    }

    /// Cell at `(row, column)`; ragged columns read as blank.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.columns
            .get(column)
            .and_then(|c| c.cells.get(row))
            .unwrap_or(&Cell::Blank)
    }

    /// Roll-column cell for `row`, with the import repair applied.
    ///
    /// The spreadsheet reader turns a literal `1` in the first roll cell into a
    /// missing value. A blank first roll cell is therefore read as `1`. No
    /// other row is touched.
    pub fn roll_cell(&self, row: usize) -> Cell {
        match self.cell(row, 0) {
            Cell::Blank if row == 0 => Cell::Integer(1),
            other => other.clone(),
        }
    }
}
