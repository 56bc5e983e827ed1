//! The resolved set of workbooks handed to the engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::tabular::TabularData;

/// Expected worksheet titles per workbook, as listed in configuration.
pub type RequiredTables = BTreeMap<String, Vec<String>>;

/// Every loaded worksheet, keyed by workbook then worksheet title.
///
/// Read-only once loaded; generation only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSet {
    workbooks: BTreeMap<String, BTreeMap<String, TabularData>>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        workbook: impl Into<String>,
        worksheet: impl Into<String>,
        data: TabularData,
    ) {
        self.workbooks
            .entry(workbook.into())
            .or_default()
            .insert(worksheet.into(), data);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_worksheet(
        mut self,
        workbook: impl Into<String>,
        worksheet: impl Into<String>,
        data: TabularData,
    ) -> Self {
        self.insert(workbook, worksheet, data);
        self
    }

    pub fn has_workbook(&self, workbook: &str) -> bool {
        self.workbooks.contains_key(workbook)
    }

    pub fn worksheet(&self, workbook: &str, worksheet: &str) -> Option<&TabularData> {
        self.workbooks.get(workbook)?.get(worksheet)
    }

    pub fn workbook_names(&self) -> impl Iterator<Item = &str> {
        self.workbooks.keys().map(String::as_str)
    }

    /// Worksheet titles of one workbook, in title order.
    pub fn worksheet_names(&self, workbook: &str) -> Vec<&str> {
        self.workbooks
            .get(workbook)
            .map(|sheets| sheets.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn worksheets(&self) -> impl Iterator<Item = (&str, &str, &TabularData)> {
        self.workbooks.iter().flat_map(|(workbook, sheets)| {
            sheets
                .iter()
                .map(move |(worksheet, data)| (workbook.as_str(), worksheet.as_str(), data))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.workbooks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let tables = TableSet::new()
            .with_worksheet("Treasure.xlsx", "Treasure For CRs 0-4 Coin", TabularData::default())
            .with_worksheet("Treasure.xlsx", "Treasure For CRs 0-4 Magic", TabularData::default())
            .with_worksheet("Gems.xlsx", "10 gp Gems", TabularData::default());

        assert!(tables.has_workbook("Gems.xlsx"));
        assert!(!tables.has_workbook("Valuables.xlsx"));
        assert!(tables
            .worksheet("Treasure.xlsx", "Treasure For CRs 0-4 Coin")
            .is_some());
        assert!(tables.worksheet("Treasure.xlsx", "missing").is_none());
        assert_eq!(tables.worksheet_names("Treasure.xlsx").len(), 2);
        assert_eq!(tables.worksheets().count(), 3);
    }
}
