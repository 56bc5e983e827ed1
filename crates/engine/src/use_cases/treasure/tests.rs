use std::sync::Arc;

use hoardgen_domain::{
    Cell, ChallengeRating, Coin, Column, Denomination, RequiredTables, TableSet, TabularData,
    WealthValue,
};
use mockall::predicate::eq;

use super::*;
use crate::infrastructure::ports::{MockRandomPort, RandomPort};
use crate::infrastructure::random::{FixedRandom, SequenceRandom, SystemRandom};
use crate::repositories::RandomService;

const MAIN_WORKBOOK: &str = "Treasure.xlsx";

fn generator(random: impl RandomPort + 'static) -> GenerateTreasure {
    GenerateTreasure::new(RandomService::new(Arc::new(random)))
}

fn cr(token: &str) -> ChallengeRating {
    ChallengeRating::parse(token).unwrap()
}

fn required(titles: &[&str]) -> RequiredTables {
    let mut required = RequiredTables::new();
    required.insert(
        MAIN_WORKBOOK.to_string(),
        titles.iter().map(|t| t.to_string()).collect(),
    );
    required
}

fn coin_tables() -> TableSet {
    TableSet::new().with_worksheet(
        MAIN_WORKBOOK,
        "Treasure For CRs 1-2 Coin",
        TabularData::two_column(
            "d2",
            "Coins",
            vec![(Some("1"), "no coins"), (Some("2"), "10 (1d4) gp")],
        ),
    )
}

fn main_table(title: &str, result: &str) -> TableSet {
    TableSet::new().with_worksheet(
        MAIN_WORKBOOK,
        title,
        TabularData::two_column("d4", "Result", vec![(Some("1-4"), result)]),
    )
}

fn gem_sheet() -> TabularData {
    TabularData::new(vec![
        Column::new("d2", vec![Cell::Integer(1), Cell::Integer(2)]),
        Column::new(
            "Gem",
            vec![Cell::parse("Azurite"), Cell::parse("Hematite")],
        ),
        Column::new(
            "Description",
            vec![Cell::parse("opaque blue"), Cell::parse("opaque gray-black")],
        ),
    ])
}

#[test]
fn test_coin_roll_end_to_end() {
    let mut random = MockRandomPort::new();
    random
        .expect_gen_range()
        .with(eq(1), eq(2))
        .times(1)
        .returning(|_, _| 2);
    random
        .expect_gen_range()
        .with(eq(1), eq(4))
        .times(1)
        .returning(|_, _| 3);

    let tables = coin_tables();
    let required = required(&["Treasure For CRs 1-2 Coin"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Coin]);

    let generated = generator(random).execute(&request).unwrap();
    let coins: Vec<&Coin> = generated.treasure.coins().collect();
    assert_eq!(coins, vec![&Coin::new(3, "gp")]);
    assert!(generated.warnings.is_empty());
}

#[test]
fn test_coin_yield_stays_in_dice_range() {
    let tables = coin_tables();
    let required = required(&["Treasure For CRs 1-2 Coin"]);
    let request = TreasureRequest::new(cr("2"), &tables, &required)
        .with_categories([TreasureCategory::Coin]);
    let generate = generator(SystemRandom::new());

    for _ in 0..100 {
        let generated = generate.execute(&request).unwrap();
        for coin in generated.treasure.coins() {
            assert_eq!(coin.denomination, "gp");
            assert!((1..=4).contains(&coin.amount));
        }
        assert!(generated.treasure.len() <= 1);
    }
}

#[test]
fn test_empty_result_adds_nothing() {
    let tables = coin_tables();
    let required = required(&["Treasure For CRs 1-2 Coin"]);
    let request = TreasureRequest::new(cr("1/2"), &tables, &required)
        .with_categories([TreasureCategory::Coin]);

    let generated = generator(SequenceRandom::new([1])).execute(&request).unwrap();
    assert!(generated.treasure.is_empty());
    assert!(generated.warnings.is_empty());
    assert_eq!(generated.treasure.to_string(), "Nothing");
}

#[test]
fn test_multiplied_coins() {
    let tables = main_table(
        "Treasure For CRs 5-10 Coin",
        "900 (2d8 x 100) gp, 500 (2d4 x 100) pp",
    );
    let required = required(&["Treasure For CRs 5-10 Coin"]);
    let request = TreasureRequest::new(cr("7"), &tables, &required)
        .with_categories([TreasureCategory::Coin]);

    // main roll, then 2d8, then 2d4
    let random = SequenceRandom::new([1, 3, 5, 2, 4]);
    let generated = generator(random).execute(&request).unwrap();
    let coins: Vec<&Coin> = generated.treasure.coins().collect();
    assert_eq!(coins, vec![&Coin::new(800, "gp"), &Coin::new(600, "pp")]);
}

#[test]
fn test_bad_coin_text_is_a_warning() {
    let tables = main_table("Treasure For CRs 1-2 Coin", "5 (1d4) gp, 3 (1d2) gp");
    let required = required(&["Treasure For CRs 1-2 Coin"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Coin]);

    let generated = generator(SequenceRandom::new([1])).execute(&request).unwrap();
    assert!(generated.treasure.is_empty());
    assert!(matches!(
        generated.warnings.as_slice(),
        [GenerationWarning::Grammar {
            source: GrammarError::DuplicateCurrency(_),
            ..
        }]
    ));
}

#[test]
fn test_roll_outside_rows_is_a_warning() {
    let tables = TableSet::new().with_worksheet(
        MAIN_WORKBOOK,
        "Treasure For CRs 1-2 Coin",
        TabularData::two_column("d4", "Coins", vec![(Some("1-2"), "10 (1d4) gp")]),
    );
    let required = required(&["Treasure For CRs 1-2 Coin"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Coin]);

    let generated = generator(SequenceRandom::new([4])).execute(&request).unwrap();
    assert!(generated.treasure.is_empty());
    assert_eq!(
        generated.warnings,
        vec![GenerationWarning::RollMissed {
            worksheet: "Treasure For CRs 1-2 Coin".to_string(),
            roll: 4,
        }]
    );
}

#[test]
fn test_no_worksheet_for_cr_is_fatal() {
    let tables = coin_tables();
    let required = required(&["Treasure For CRs 1-2 Coin"]);
    let request = TreasureRequest::new(cr("5"), &tables, &required)
        .with_categories([TreasureCategory::Coin]);

    let err = generator(FixedRandom(1)).execute(&request).unwrap_err();
    assert!(matches!(
        err,
        TreasureError::NoWorksheet {
            category: TreasureCategory::Coin,
            ..
        }
    ));
}

#[test]
fn test_missing_required_workbook_is_fatal() {
    let tables = coin_tables();
    let mut required = required(&["Treasure For CRs 1-2 Coin"]);
    required.insert("Extra.xlsx".into(), vec![]);
    let request = TreasureRequest::new(cr("1"), &tables, &required);

    let err = generator(FixedRandom(1)).execute(&request).unwrap_err();
    assert!(matches!(err, TreasureError::MissingWorkbook(name) if name == "Extra.xlsx"));
}

#[test]
fn test_missing_main_worksheet_is_fatal() {
    let tables = coin_tables();
    let required = required(&["Treasure For CRs 1-2 Coin", "Treasure For CRs 1-2 Magic"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Magic]);

    let err = generator(FixedRandom(1)).execute(&request).unwrap_err();
    assert!(matches!(err, TreasureError::MissingWorksheet { .. }));
}

#[test]
fn test_unreadable_main_worksheet_is_fatal() {
    let tables = TableSet::new().with_worksheet(
        MAIN_WORKBOOK,
        "Treasure For CRs 1-2 Coin",
        TabularData::two_column("Roll", "Coins", vec![(Some("1"), "10 (1d4) gp")]),
    );
    let required = required(&["Treasure For CRs 1-2 Coin"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Coin]);

    let err = generator(FixedRandom(1)).execute(&request).unwrap_err();
    assert!(matches!(err, TreasureError::UnreadableTable { .. }));
}

#[test]
fn test_magic_items_roll_on_numbered_table() {
    let tables = main_table("Treasure For CRs 1-4 Magic", "1d2 rolls on table #3").with_worksheet(
        "Magic Items.xlsx",
        "Magic Items 3",
        TabularData::two_column(
            "d2",
            "Item",
            vec![(Some("1"), "Potion of healing"), (Some("2"), "Bag of holding")],
        ),
    );
    let required = required(&["Treasure For CRs 1-4 Magic"]);
    let request = TreasureRequest::new(cr("3"), &tables, &required)
        .with_categories([TreasureCategory::Magic]);

    // main roll, count 1d2 -> 2, then one roll per item
    let random = SequenceRandom::new([1, 2, 1, 2]);
    let generated = generator(random).execute(&request).unwrap();

    let names: Vec<&str> = generated
        .treasure
        .magic_items()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, vec!["Potion of healing", "Bag of holding"]);
    assert!(generated
        .treasure
        .magic_items()
        .all(|item| item.source_worksheet == "Magic Items 3"));
    assert!(generated.warnings.is_empty());
}

#[test]
fn test_missing_magic_table_is_skipped() {
    let tables = main_table(
        "Treasure For CRs 1-4 Magic",
        "1 roll on table #9, 1 roll on table #3",
    )
    .with_worksheet(
        "Magic Items.xlsx",
        "Magic Items 3",
        TabularData::two_column("d2", "Item", vec![(Some("1-2"), "Potion of healing")]),
    );
    let required = required(&["Treasure For CRs 1-4 Magic"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Magic]);

    let generated = generator(SequenceRandom::new([1, 1])).execute(&request).unwrap();
    assert_eq!(generated.treasure.magic_items().count(), 1);
    assert_eq!(
        generated.warnings,
        vec![GenerationWarning::MissingSubTable {
            workbook: "Magic Items.xlsx".to_string(),
            worksheet: "Magic Items 9".to_string(),
        }]
    );
}

#[test]
fn test_non_numeric_table_reference_is_skipped() {
    let tables = main_table("Treasure For CRs 1-4 Magic", "1 roll on table #B");
    let required = required(&["Treasure For CRs 1-4 Magic"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Magic]);

    let generated = generator(SequenceRandom::new([1])).execute(&request).unwrap();
    assert!(generated.treasure.is_empty());
    assert_eq!(
        generated.warnings,
        vec![GenerationWarning::BadTableNumber {
            token: "B".to_string()
        }]
    );
}

#[test]
fn test_no_magic_workbook_is_skipped() {
    let tables = main_table("Treasure For CRs 1-4 Magic", "1 roll on table #3");
    let required = required(&["Treasure For CRs 1-4 Magic"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Magic]);

    let generated = generator(SequenceRandom::new([1])).execute(&request).unwrap();
    assert!(generated.treasure.is_empty());
    assert!(matches!(
        generated.warnings.as_slice(),
        [GenerationWarning::NoSubTableWorkbook { .. }]
    ));
}

#[test]
fn test_gems_are_wrapped_in_other_wealth() {
    let tables = main_table("Treasure For CRs 1-4 Other", "2 (1d2) 10 gp gems")
        .with_worksheet("Gems.xlsx", "10 gp Gems", gem_sheet())
        .with_worksheet("Gems.xlsx", "50 gp Gems", gem_sheet());
    let required = required(&["Treasure For CRs 1-4 Other"]);
    let request = TreasureRequest::new(cr("4"), &tables, &required)
        .with_categories([TreasureCategory::Other]);

    // main roll, count 1d2 -> 2, then one roll per gem
    let random = SequenceRandom::new([1, 2, 1, 2]);
    let generated = generator(random).execute(&request).unwrap();

    assert_eq!(generated.treasure.entry_count(), 1);
    assert_eq!(generated.treasure.len(), 2);
    let wealth = generated.treasure.other_wealth().next().unwrap();
    let gems: Vec<_> = wealth.gems().collect();
    assert_eq!(gems[0].kind, "Azurite");
    assert_eq!(gems[0].description, "opaque blue");
    assert_eq!(gems[1].kind, "Hematite");
    assert!(gems
        .iter()
        .all(|gem| gem.value == WealthValue::new(10, Denomination::Gold)));
}

#[test]
fn test_valuables_split_on_example_marker() {
    let tables = main_table("Treasure For CRs 1-4 Other", "25 gp valuables").with_worksheet(
        "Valuables.xlsx",
        "25 gp Art Objects",
        TabularData::two_column(
            "d2",
            "Valuable",
            vec![(Some("1-2"), "Silver ewer Ex: engraved with vines")],
        ),
    );
    let required = required(&["Treasure For CRs 1-4 Other"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Other]);

    let generated = generator(SequenceRandom::new([1, 2])).execute(&request).unwrap();
    let wealth = generated.treasure.other_wealth().next().unwrap();
    let valuable = wealth.valuables().next().unwrap();
    assert_eq!(valuable.item, "Silver ewer");
    assert_eq!(valuable.example, "engraved with vines");
    assert_eq!(valuable.value, WealthValue::new(25, Denomination::Gold));
}

#[test]
fn test_missing_wealth_worksheet_adds_no_other_wealth() {
    let tables = main_table("Treasure For CRs 1-4 Other", "100 gp gems")
        .with_worksheet("Gems.xlsx", "10 gp Gems", gem_sheet());
    let required = required(&["Treasure For CRs 1-4 Other"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Other]);

    let generated = generator(SequenceRandom::new([1])).execute(&request).unwrap();
    assert!(generated.treasure.is_empty());
    assert!(matches!(
        generated.warnings.as_slice(),
        [GenerationWarning::NoWealthWorksheet { value: 100, .. }]
    ));
}

#[test]
fn test_full_hoard_renders_in_category_order() {
    let mut tables = main_table("Treasure For CRs 1-4 Coin", "30 (1d6 x 10) sp")
        .with_worksheet(
            MAIN_WORKBOOK,
            "Treasure For CRs 1-4 Magic",
            TabularData::two_column("d4", "Result", vec![(Some("1-4"), "1 roll on table #1")]),
        )
        .with_worksheet(
            MAIN_WORKBOOK,
            "Treasure For CRs 1-4 Other",
            TabularData::two_column("d4", "Result", vec![(Some("1-4"), "10 gp gems")]),
        )
        .with_worksheet("Gems.xlsx", "10 gp Gems", gem_sheet());
    tables.insert(
        "Magic Items.xlsx",
        "Magic Items 1",
        TabularData::two_column("d2", "Item", vec![(Some("1-2"), "Potion of healing")]),
    );
    let required = required(&[
        "Treasure For CRs 1-4 Coin",
        "Treasure For CRs 1-4 Magic",
        "Treasure For CRs 1-4 Other",
    ]);
    let request = TreasureRequest::new(cr("2"), &tables, &required);

    // coin: main, 1d6; magic: main, item; other: main, gem
    let random = SequenceRandom::new([1, 3, 1, 1, 1, 1]);
    let generated = generator(random).execute(&request).unwrap();

    assert_eq!(
        generated.treasure.to_string(),
        "Coins: 30 sp\n\
         Magic Item: Potion of healing (Magic Items 1)\n\
         Other Wealth:\n    Gem: Azurite (opaque blue) worth 10 gold"
    );
    assert!(generated.warnings.is_empty());
}

#[test]
fn test_oversized_coin_dice_is_a_warning() {
    let tables = main_table("Treasure For CRs 1-2 Coin", "1 (3d2000000000) gp");
    let required = required(&["Treasure For CRs 1-2 Coin"]);
    let request = TreasureRequest::new(cr("1"), &tables, &required)
        .with_categories([TreasureCategory::Coin]);

    let generated = generator(FixedRandom(2_000_000_000))
        .execute(&request)
        .unwrap();
    assert!(generated.treasure.is_empty());
    assert!(matches!(
        generated.warnings.as_slice(),
        [GenerationWarning::Grammar {
            source: GrammarError::Dice { .. },
            ..
        }]
    ));
}

#[test]
fn test_repeated_rolls_reuse_the_same_magic_table() {
    let tables = main_table(
        "Treasure For CRs 1-4 Magic",
        "2 rolls on table #3, 1 roll on table #3",
    )
    .with_worksheet(
        "Magic Items.xlsx",
        "Magic Items 3",
        TabularData::two_column(
            "d2",
            "Item",
            vec![(Some("1"), "Potion of healing"), (Some("2"), "Bag of holding")],
        ),
    );
    let required = required(&["Treasure For CRs 1-4 Magic"]);
    let request = TreasureRequest::new(cr("2"), &tables, &required)
        .with_categories([TreasureCategory::Magic]);

    // main roll, then one roll per item
    let random = SequenceRandom::new([1, 2, 1, 2]);
    let generated = generator(random).execute(&request).unwrap();

    let names: Vec<&str> = generated
        .treasure
        .magic_items()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, vec!["Bag of holding", "Potion of healing", "Bag of holding"]);
    assert!(generated.warnings.is_empty());
}
