//! Whole table set validation.

use std::fmt;

use hoardgen_domain::{RequiredTables, TableSet};

use super::{validate_worksheet, WorksheetError, WorksheetKind};

/// One rejected worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetIssue {
    pub workbook: String,
    pub worksheet: String,
    pub error: WorksheetError,
}

/// Outcome of checking a loaded table set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub missing_workbooks: Vec<String>,
    /// `(workbook, worksheet)` pairs named in configuration but not loaded
    pub missing_worksheets: Vec<(String, String)>,
    pub invalid_worksheets: Vec<WorksheetIssue>,
    /// Worksheets that went through the validator
    pub checked: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing_workbooks.is_empty()
            && self.missing_worksheets.is_empty()
            && self.invalid_worksheets.is_empty()
    }

    /// Number of distinct problems found.
    pub fn problem_count(&self) -> usize {
        self.missing_workbooks.len() + self.missing_worksheets.len() + self.invalid_worksheets.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "All {} worksheets are valid", self.checked);
        }
        write!(f, "{} problem(s) found:", self.problem_count())?;
        for workbook in &self.missing_workbooks {
            write!(f, "\n  {}: workbook not loaded", workbook)?;
        }
        for (workbook, worksheet) in &self.missing_worksheets {
            write!(f, "\n  {} / {}: worksheet not found", workbook, worksheet)?;
        }
        for issue in &self.invalid_worksheets {
            write!(
                f,
                "\n  {} / {}: {} ({})",
                issue.workbook,
                issue.worksheet,
                issue.error.reason_tag(),
                issue.error
            )?;
        }
        Ok(())
    }
}

/// Check that every required table is present, then validate every loaded worksheet.
pub fn validate_table_set(tables: &TableSet, required: &RequiredTables) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (workbook, worksheets) in required {
        if !tables.has_workbook(workbook) {
            tracing::warn!(workbook = %workbook, "Required workbook not loaded");
            report.missing_workbooks.push(workbook.clone());
            continue;
        }
        for worksheet in worksheets {
            if tables.worksheet(workbook, worksheet).is_none() {
                tracing::warn!(workbook = %workbook, worksheet = %worksheet, "Required worksheet not found");
                report
                    .missing_worksheets
                    .push((workbook.clone(), worksheet.clone()));
            }
        }
    }

    for (workbook, worksheet, data) in tables.worksheets() {
        let kind = WorksheetKind::infer(workbook, data);
        report.checked += 1;
        if let Err(error) = validate_worksheet(data, kind) {
            tracing::warn!(
                workbook,
                worksheet,
                reason = error.reason_tag(),
                error = %error,
                "Worksheet failed validation"
            );
            report.invalid_worksheets.push(WorksheetIssue {
                workbook: workbook.to_string(),
                worksheet: worksheet.to_string(),
                error,
            });
        }
    }

    tracing::info!(
        checked = report.checked,
        problems = report.problem_count(),
        "Table validation finished"
    );
    report
}

/// Validate a loaded table set against its configuration.
#[derive(Debug, Default)]
pub struct ValidateTables;

impl ValidateTables {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, tables: &TableSet, required: &RequiredTables) -> ValidationReport {
        validate_table_set(tables, required)
    }
}
