//! Worksheet validation.
//!
//! A worksheet is usable as a roll table when its first column names a die
//! and its roll cells cover exactly `1..=max`, in order, with no gaps or
//! overlaps. Some kinds of worksheet add header and cell checks on top.

mod table_set;

pub use table_set::{validate_table_set, ValidateTables, ValidationReport, WorksheetIssue};

use hoardgen_domain::{die_size_from_header, TabularData};

use crate::use_cases::treasure::grammar::{is_empty_result, parse_coin_text};
use crate::use_cases::treasure::GrammarError;

/// How a worksheet is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorksheetKind {
    /// Roll column plus one result column
    Normal,
    /// Creature stat block; reserved and never checked
    Stat,
    /// Roll column, item column and description/example column
    GemOrValuable,
}

impl WorksheetKind {
    pub fn expected_columns(&self) -> usize {
        match self {
            Self::Normal | Self::Stat => 2,
            Self::GemOrValuable => 3,
        }
    }

    /// Pick the kind for a loaded worksheet.
    ///
    /// Workbooks named after characters hold stat blocks; otherwise a
    /// three-column sheet is a gem or valuable table.
    pub fn infer(workbook: &str, data: &TabularData) -> Self {
        if workbook.to_ascii_lowercase().contains("character") {
            Self::Stat
        } else if data.column_count() == 3 {
            Self::GemOrValuable
        } else {
            Self::Normal
        }
    }
}

/// Why a worksheet was rejected. Row numbers count data rows from 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorksheetError {
    #[error("expected {expected} columns, found {found}")]
    BadColumnCount { expected: usize, found: usize },

    #[error("roll header '{0}' names no die")]
    BadRollHeader(String),

    #[error("column {column} header '{header}' should mention {expected}")]
    BadHeader {
        column: usize,
        header: String,
        expected: &'static str,
    },

    #[error("row {row}: roll cell '{cell}' does not continue from {last_covered}")]
    GapOrOverlap {
        row: usize,
        cell: String,
        last_covered: u32,
    },

    #[error("rolls cover 1-{covered} but the die is d{max}")]
    IncompleteCoverage { covered: u32, max: u32 },

    #[error("row {row}: '{column}' is blank")]
    MissingCell { row: usize, column: String },

    #[error("row {row}: currency '{currency}' appears more than once")]
    DuplicateCurrency { row: usize, currency: String },

    #[error("row {row}: {reason}")]
    CoinGrammar { row: usize, reason: String },
}

impl WorksheetError {
    /// Short reason tag used when grouping failures.
    pub fn reason_tag(&self) -> &'static str {
        match self {
            Self::BadColumnCount { .. } => "bad column count",
            Self::BadRollHeader(_) => "bad roll header",
            Self::BadHeader { .. } => "bad header",
            Self::GapOrOverlap { .. } => "gap or overlap",
            Self::IncompleteCoverage { .. } => "incomplete coverage",
            Self::MissingCell { .. } => "missing cell",
            Self::DuplicateCurrency { .. } => "duplicate currency",
            Self::CoinGrammar { .. } => "bad coin entry",
        }
    }
}

/// Check one worksheet against its kind.
pub fn validate_worksheet(data: &TabularData, kind: WorksheetKind) -> Result<(), WorksheetError> {
    if kind == WorksheetKind::Stat {
        return Ok(());
    }

    let expected = kind.expected_columns();
    if data.column_count() != expected {
        return Err(WorksheetError::BadColumnCount {
            expected,
            found: data.column_count(),
        });
    }

    let roll_header = data.header(0).unwrap_or_default();
    let max = die_size_from_header(roll_header)
        .ok_or_else(|| WorksheetError::BadRollHeader(roll_header.to_string()))?;

    let result_header = data.header(1).unwrap_or_default();
    if kind == WorksheetKind::GemOrValuable {
        check_detail_header(result_header, data.header(2).unwrap_or_default())?;
    }
    let coin_sheet =
        kind == WorksheetKind::Normal && result_header.to_ascii_lowercase().contains("coin");

    let mut last_covered: u32 = 0;
    for row in 0..data.row_count() {
        if coin_sheet {
            check_coin_cell(row, data.cell(row, 1).text().unwrap_or_default())?;
        }
        let roll = data.roll_cell(row);
        if roll.is_blank() {
            continue;
        }
        let (_, high) = roll
            .roll_span()
            .filter(|(low, _)| last_covered.checked_add(1) == Some(*low))
            .ok_or_else(|| WorksheetError::GapOrOverlap {
                row: row + 1,
                cell: roll.to_string(),
                last_covered,
            })?;
        last_covered = high;

        if kind == WorksheetKind::GemOrValuable {
            for column in 1..3 {
                if data.cell(row, column).is_blank() {
                    return Err(WorksheetError::MissingCell {
                        row: row + 1,
                        column: data.header(column).unwrap_or_default().to_string(),
                    });
                }
            }
        }
    }

    if last_covered != max {
        return Err(WorksheetError::IncompleteCoverage {
            covered: last_covered,
            max,
        });
    }
    Ok(())
}

/// The second header names gems or valuables; the third must match it.
fn check_detail_header(item_header: &str, detail_header: &str) -> Result<(), WorksheetError> {
    let item = item_header.to_ascii_lowercase();
    let expected = if item.contains("gem") {
        "description"
    } else if item.contains("valuable") {
        "example"
    } else {
        return Err(WorksheetError::BadHeader {
            column: 2,
            header: item_header.to_string(),
            expected: "gem or valuable",
        });
    };
    if !detail_header.to_ascii_lowercase().contains(expected) {
        return Err(WorksheetError::BadHeader {
            column: 3,
            header: detail_header.to_string(),
            expected,
        });
    }
    Ok(())
}

fn check_coin_cell(row: usize, text: String) -> Result<(), WorksheetError> {
    if is_empty_result(&text) {
        return Ok(());
    }
    parse_coin_text(&text).map(|_| ()).map_err(|e| match e {
        GrammarError::DuplicateCurrency(currency) => WorksheetError::DuplicateCurrency {
            row: row + 1,
            currency,
        },
        other => WorksheetError::CoinGrammar {
            row: row + 1,
            reason: other.to_string(),
        },
    })
}
