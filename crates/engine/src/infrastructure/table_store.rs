//! Table set loading.
//!
//! Workbooks arrive as a JSON export of the spreadsheets, one object per
//! workbook, one object per worksheet, each worksheet a list of named columns:
//!
//! ```json
//! {
//!   "Treasure.xlsx": {
//!     "Treasure For CRs 0-4 Coin": {
//!       "columns": [
//!         {"name": "d100", "cells": ["1-30", "31-60", "61-100"]},
//!         {"name": "Coins", "cells": ["5 (1d6) cp", "4 (1d6) sp", "3 (1d6) gp"]}
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Raw cells (string, number or null) become typed [`Cell`]s here, once.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hoardgen_domain::{Cell, Column, TableSet, TabularData};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Default location of the exported tables.
pub const DEFAULT_TABLES_PATH: &str = "data/tables.json";

/// Errors loading a table export.
#[derive(Debug, Error)]
pub enum TableLoadError {
    #[error("Table file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Table file is not a valid table export: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawWorksheet {
    columns: Vec<RawColumn>,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    name: String,
    #[serde(default)]
    cells: Vec<Value>,
}

type RawExport = BTreeMap<String, BTreeMap<String, RawWorksheet>>;

/// Classify one raw JSON cell.
fn cell_from_json(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Blank,
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Integer(i),
            None => n.as_f64().map(Cell::from_number).unwrap_or(Cell::Blank),
        },
        Value::String(s) => Cell::parse(s),
        other => Cell::Text(other.to_string()),
    }
}

fn worksheet_from_raw(raw: RawWorksheet) -> TabularData {
    TabularData::new(
        raw.columns
            .into_iter()
            .map(|column| {
                let cells = column.cells.iter().map(cell_from_json).collect();
                Column::new(column.name, cells)
            })
            .collect(),
    )
}

/// Parse a table export from a JSON string.
pub fn parse_table_set(content: &str) -> Result<TableSet, TableLoadError> {
    let raw: RawExport = serde_json::from_str(content)?;
    let mut tables = TableSet::new();
    for (workbook, sheets) in raw {
        for (worksheet, data) in sheets {
            tables.insert(workbook.clone(), worksheet, worksheet_from_raw(data));
        }
    }
    Ok(tables)
}

/// Load a table export from `path`.
pub fn load_table_set(path: impl AsRef<Path>) -> Result<TableSet, TableLoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| TableLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tables = parse_table_set(&content)?;
    tracing::info!(
        path = %path.display(),
        worksheets = tables.worksheets().count(),
        "Loaded table set"
    );
    Ok(tables)
}
