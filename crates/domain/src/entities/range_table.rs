//! Roll-range tables
//!
//! A range table is the in-memory form of a validated worksheet: an ordered
//! list of rows, each answering for an inclusive band of die results.

use serde::{Deserialize, Serialize};

use super::tabular::{die_size_from_header, TabularData};
use crate::error::DomainError;

/// One row of a range table.
///
/// # Invariants
///
/// - `1 <= low <= high`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRow {
    low: u32,
    high: u32,
    text: String,
    text2: Option<String>,
}

impl RangeRow {
    pub fn new(
        low: u32,
        high: u32,
        text: impl Into<String>,
        text2: Option<String>,
    ) -> Result<Self, DomainError> {
        if low < 1 {
            return Err(DomainError::validation("roll range must start at 1 or above"));
        }
        if low > high {
            return Err(DomainError::validation(format!(
                "roll range {}-{} is reversed",
                low, high
            )));
        }
        Ok(Self {
            low,
            high,
            text: text.into(),
            text2,
        })
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Second result column, present on three-column worksheets.
    pub fn text2(&self) -> Option<&str> {
        self.text2.as_deref()
    }

    pub fn covers(&self, roll: u32) -> bool {
        (self.low..=self.high).contains(&roll)
    }
}

/// A worksheet's rows plus the die that is rolled against them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeTable {
    max_roll: u32,
    rows: Vec<RangeRow>,
}

impl RangeTable {
    pub fn new(max_roll: u32, rows: Vec<RangeRow>) -> Self {
        Self { max_roll, rows }
    }

    /// Build a range table from imported tabular data.
    ///
    /// The first column header names the die; rows whose roll cell is blank
    /// are skipped. Structural problems beyond that are the validator's job,
    /// so a cell that is not a roll range is reported rather than guessed.
    pub fn from_tabular(data: &TabularData) -> Result<Self, DomainError> {
        let header = data
            .header(0)
            .ok_or_else(|| DomainError::validation("worksheet has no columns"))?;
        let max_roll = die_size_from_header(header).ok_or_else(|| {
            DomainError::validation(format!("roll header '{}' names no die", header))
        })?;

        let mut rows = Vec::new();
        for row in 0..data.row_count() {
            let roll = data.roll_cell(row);
            if roll.is_blank() {
                continue;
            }
            let (low, high) = roll.roll_span().ok_or_else(|| {
                DomainError::validation(format!("row {} has roll cell '{}'", row + 1, roll))
            })?;
            let text = data.cell(row, 1).text().unwrap_or_default();
            let text2 = data.cell(row, 2).text();
            rows.push(RangeRow::new(low, high, text, text2)?);
        }
        Ok(Self::new(max_roll, rows))
    }

    pub fn max_roll(&self) -> u32 {
        self.max_roll
    }

    pub fn rows(&self) -> &[RangeRow] {
        &self.rows
    }

    /// First row whose range contains `roll`.
    pub fn lookup(&self, roll: u32) -> Result<&RangeRow, DomainError> {
        self.rows
            .iter()
            .find(|row| row.covers(roll))
            .ok_or_else(|| DomainError::not_found("RangeRow", format!("roll {}", roll)))
    }
}
