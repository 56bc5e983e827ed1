//! Treasure use cases.
//!
//! Generates a hoard for a challenge rating. The flow per category is:
//! 1. Resolve the main worksheet whose title covers the CR
//! 2. Roll on it and read the matched row's result text
//! 3. Parse the text with the category's grammar
//! 4. Roll any dice and sub-tables the entries call for
//! 5. Insert the resulting items into the [`Treasure`]
//!
//! Problems with a single entry or sub-table never abort generation; they are
//! collected as [`GenerationWarning`]s next to the treasure.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use hoardgen_domain::{
    ChallengeRating, DomainError, Gem, MagicItem, OtherWealth, RangeTable, RequiredTables,
    TableSet, Treasure, Valuable,
};

pub mod grammar;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use grammar::{CountToken, GrammarError, WealthCategory};
pub use resolver::{resolve_in_required, resolve_worksheet, ResolvedWorksheet, TreasureCategory};

use crate::repositories::RandomService;
use grammar::other_wealth::split_detail;
use grammar::{
    is_empty_result, parse_coin_text, parse_magic_item_text, parse_wealth_text, CoinEntry,
    MagicItemEntry, WealthEntry,
};
use resolver::magic_item_worksheet_name;

/// Workbooks whose name contains this hold the numbered magic item tables.
const MAGIC_ITEM_WORKBOOK_KEYWORD: &str = "magic item";

/// Container for treasure use cases.
pub struct TreasureUseCases {
    pub generate: Arc<GenerateTreasure>,
}

impl TreasureUseCases {
    pub fn new(generate: Arc<GenerateTreasure>) -> Self {
        Self { generate }
    }
}

/// Everything one generation run needs.
#[derive(Debug, Clone)]
pub struct TreasureRequest<'a> {
    pub categories: Vec<TreasureCategory>,
    pub cr: ChallengeRating,
    pub tables: &'a TableSet,
    pub required_tables: &'a RequiredTables,
}

impl<'a> TreasureRequest<'a> {
    /// A request for all three categories.
    pub fn new(cr: ChallengeRating, tables: &'a TableSet, required_tables: &'a RequiredTables) -> Self {
        Self {
            categories: TreasureCategory::all().to_vec(),
            cr,
            tables,
            required_tables,
        }
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = TreasureCategory>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }
}

/// A generated hoard plus the recoverable problems met on the way.
#[derive(Debug, Clone, Default)]
pub struct GeneratedTreasure {
    pub treasure: Treasure,
    pub warnings: Vec<GenerationWarning>,
}

/// Failures that stop generation.
#[derive(Debug, thiserror::Error)]
pub enum TreasureError {
    #[error("No {category} worksheet covers CR {cr}")]
    NoWorksheet {
        category: TreasureCategory,
        cr: ChallengeRating,
    },
    #[error("Required workbook '{0}' is not loaded")]
    MissingWorkbook(String),
    #[error("Worksheet '{worksheet}' is missing from workbook '{workbook}'")]
    MissingWorksheet { workbook: String, worksheet: String },
    #[error("Worksheet '{worksheet}' in '{workbook}' is not a roll table: {source}")]
    UnreadableTable {
        workbook: String,
        worksheet: String,
        #[source]
        source: DomainError,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Recoverable problems. Each one means some entry produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationWarning {
    #[error("Roll {roll} on '{worksheet}' matched no row")]
    RollMissed { worksheet: String, roll: u32 },
    #[error("Could not read '{text}' from '{worksheet}': {source}")]
    Grammar {
        worksheet: String,
        text: String,
        #[source]
        source: GrammarError,
    },
    #[error("Table reference '#{token}' is not a number")]
    BadTableNumber { token: String },
    #[error("No workbook containing '{keyword}' is loaded")]
    NoSubTableWorkbook { keyword: &'static str },
    #[error("Worksheet '{worksheet}' not found in '{workbook}'")]
    MissingSubTable { workbook: String, worksheet: String },
    #[error("No {category} worksheet is worth {value} {currency}")]
    NoWealthWorksheet {
        category: WealthCategory,
        value: u32,
        currency: String,
    },
    #[error("Worksheet '{worksheet}' in '{workbook}' is not a roll table: {reason}")]
    UnreadableSubTable {
        workbook: String,
        worksheet: String,
        reason: String,
    },
}

/// Generate a treasure hoard.
pub struct GenerateTreasure {
    random: RandomService,
}

impl GenerateTreasure {
    pub fn new(random: RandomService) -> Self {
        Self { random }
    }

    pub fn execute(&self, request: &TreasureRequest<'_>) -> Result<GeneratedTreasure, TreasureError> {
        tracing::info!(
            cr = %request.cr,
            categories = ?request.categories,
            "Generating treasure"
        );

        if let Some(missing) = request
            .required_tables
            .keys()
            .find(|workbook| !request.tables.has_workbook(workbook))
        {
            return Err(TreasureError::MissingWorkbook(missing.clone()));
        }

        let mut run = Run {
            random: &self.random,
            tables: request.tables,
            sub_tables: HashMap::new(),
            out: GeneratedTreasure::default(),
        };
        for category in &request.categories {
            run.category(*category, request)?;
        }

        tracing::info!(
            items = run.out.treasure.len(),
            warnings = run.out.warnings.len(),
            "Treasure generated"
        );
        Ok(run.out)
    }
}

/// State for one `execute` call.
struct Run<'a> {
    random: &'a RandomService,
    tables: &'a TableSet,
    /// Sub-tables already parsed, keyed by `(workbook, worksheet)`
    sub_tables: HashMap<(String, String), Rc<RangeTable>>,
    out: GeneratedTreasure,
}

impl Run<'_> {
    fn warn(&mut self, warning: GenerationWarning) {
        tracing::warn!(warning = %warning, "Treasure entry skipped");
        self.out.warnings.push(warning);
    }

    fn count(&self, token: &CountToken) -> u32 {
        match token {
            CountToken::Literal(n) => *n,
            CountToken::Dice(die) => self.random.roll(die),
        }
    }

    fn category(
        &mut self,
        category: TreasureCategory,
        request: &TreasureRequest<'_>,
    ) -> Result<(), TreasureError> {
        let cr = request.cr;
        let resolved = resolve_in_required(category, cr.value(), request.required_tables)
            .ok_or(TreasureError::NoWorksheet { category, cr })?;
        let data = self
            .tables
            .worksheet(resolved.workbook, resolved.worksheet)
            .ok_or_else(|| TreasureError::MissingWorksheet {
                workbook: resolved.workbook.to_string(),
                worksheet: resolved.worksheet.to_string(),
            })?;
        let table =
            RangeTable::from_tabular(data).map_err(|source| TreasureError::UnreadableTable {
                workbook: resolved.workbook.to_string(),
                worksheet: resolved.worksheet.to_string(),
                source,
            })?;

        let (roll, row) = self.random.roll_on(&table);
        tracing::debug!(
            workbook = resolved.workbook,
            worksheet = resolved.worksheet,
            roll,
            %category,
            "Rolled main treasure table"
        );
        let Some(row) = row else {
            self.warn(GenerationWarning::RollMissed {
                worksheet: resolved.worksheet.to_string(),
                roll,
            });
            return Ok(());
        };
        let text = row.text();
        if is_empty_result(text) {
            return Ok(());
        }

        let worksheet = resolved.worksheet;
        match category {
            TreasureCategory::Coin => {
                if let Some(entries) = self.parsed(worksheet, text, parse_coin_text(text)) {
                    self.coins(entries)?;
                }
            }
            TreasureCategory::Magic => {
                if let Some(entries) = self.parsed(worksheet, text, parse_magic_item_text(text)) {
                    self.magic_items(entries)?;
                }
            }
            TreasureCategory::Other => {
                if let Some(entries) = self.parsed(worksheet, text, parse_wealth_text(text)) {
                    self.other_wealth(entries)?;
                }
            }
        }
        Ok(())
    }

    /// A grammar failure drops the whole result text.
    fn parsed<T>(
        &mut self,
        worksheet: &str,
        text: &str,
        result: Result<T, GrammarError>,
    ) -> Option<T> {
        match result {
            Ok(entries) => Some(entries),
            Err(source) => {
                self.warn(GenerationWarning::Grammar {
                    worksheet: worksheet.to_string(),
                    text: text.to_string(),
                    source,
                });
                None
            }
        }
    }

    fn coins(&mut self, entries: Vec<CoinEntry>) -> Result<(), TreasureError> {
        for entry in entries {
            let rolled = self.random.roll(&entry.dice);
            let coin = entry.coin(rolled);
            tracing::debug!(dice = %entry.dice, rolled, coin = %coin, "Coins rolled");
            self.out.treasure.add(coin, None)?;
        }
        Ok(())
    }

    fn magic_items(&mut self, entries: Vec<MagicItemEntry>) -> Result<(), TreasureError> {
        let tables = self.tables;
        let workbooks: Vec<&str> = tables
            .workbook_names()
            .filter(|name| {
                name.to_ascii_lowercase()
                    .contains(MAGIC_ITEM_WORKBOOK_KEYWORD)
            })
            .collect();

        for entry in entries {
            let Some(number) = entry.table_number() else {
                self.warn(GenerationWarning::BadTableNumber {
                    token: entry.table_token.clone(),
                });
                continue;
            };
            for _ in 0..self.count(&entry.count) {
                match self.magic_item(&workbooks, number) {
                    Ok(Some(item)) => {
                        self.out.treasure.add(item, None)?;
                    }
                    Ok(None) => {}
                    Err(warning) => {
                        self.warn(warning);
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Roll one item from numbered table `number`.
    ///
    /// `Err` means no roll on this table can succeed; `Ok(None)` is a single miss.
    fn magic_item(
        &mut self,
        workbooks: &[&str],
        number: u32,
    ) -> Result<Option<MagicItem>, GenerationWarning> {
        let workbook = *self
            .random
            .choose(workbooks)
            .ok_or(GenerationWarning::NoSubTableWorkbook {
                keyword: MAGIC_ITEM_WORKBOOK_KEYWORD,
            })?;
        let worksheet = magic_item_worksheet_name(workbook, number);

        let table = self.sub_table(workbook, &worksheet)?;
        let (roll, row) = self.random.roll_on(&table);
        tracing::debug!(workbook, worksheet = %worksheet, roll, "Rolled magic item table");
        match row {
            Some(row) => Ok(Some(MagicItem::new(row.text(), worksheet))),
            None => {
                self.warn(GenerationWarning::RollMissed { worksheet, roll });
                Ok(None)
            }
        }
    }

    fn other_wealth(&mut self, entries: Vec<WealthEntry>) -> Result<(), TreasureError> {
        let tables = self.tables;
        let mut wealth = OtherWealth::new();

        for entry in entries {
            let keyword = entry.category.workbook_keyword();
            let mut candidates: Vec<(&str, &str)> = Vec::new();
            for workbook in tables.workbook_names() {
                if !workbook.to_ascii_lowercase().contains(keyword) {
                    continue;
                }
                for worksheet in tables.worksheet_names(workbook) {
                    if entry.matches_title(worksheet) {
                        candidates.push((workbook, worksheet));
                    }
                }
            }

            for _ in 0..self.count(&entry.count) {
                let Some(&(workbook, worksheet)) = self.random.choose(&candidates) else {
                    self.warn(GenerationWarning::NoWealthWorksheet {
                        category: entry.category,
                        value: entry.value,
                        currency: entry.currency.clone(),
                    });
                    break;
                };
                let table = match self.sub_table(workbook, worksheet) {
                    Ok(table) => table,
                    Err(warning) => {
                        self.warn(warning);
                        break;
                    }
                };
                let (roll, row) = self.random.roll_on(&table);
                tracing::debug!(workbook, worksheet, roll, "Rolled {} table", entry.category);
                let Some(row) = row else {
                    self.warn(GenerationWarning::RollMissed {
                        worksheet: worksheet.to_string(),
                        roll,
                    });
                    continue;
                };

                let (name, detail) = split_detail(entry.category, row.text(), row.text2());
                let value = entry.wealth_value();
                match entry.category {
                    WealthCategory::Gem => wealth.add(Gem::new(name, detail, value), None)?,
                    WealthCategory::Valuable => {
                        wealth.add(Valuable::new(name, detail, value), None)?
                    }
                };
            }
        }

        if !wealth.is_empty() {
            self.out.treasure.add(wealth, None)?;
        }
        Ok(())
    }

    /// Parse a sub-table once per run; later rolls reuse it.
    fn sub_table(
        &mut self,
        workbook: &str,
        worksheet: &str,
    ) -> Result<Rc<RangeTable>, GenerationWarning> {
        let key = (workbook.to_string(), worksheet.to_string());
        if let Some(table) = self.sub_tables.get(&key) {
            return Ok(Rc::clone(table));
        }

        let data = self.tables.worksheet(workbook, worksheet).ok_or_else(|| {
            GenerationWarning::MissingSubTable {
                workbook: workbook.to_string(),
                worksheet: worksheet.to_string(),
            }
        })?;
        let table = RangeTable::from_tabular(data).map_err(|e| {
            GenerationWarning::UnreadableSubTable {
                workbook: workbook.to_string(),
                worksheet: worksheet.to_string(),
                reason: e.to_string(),
            }
        })?;
        let table = Rc::new(table);
        self.sub_tables.insert(key, Rc::clone(&table));
        Ok(table)
    }
}
